//! Game structure.

use std::fmt::{self, Display};

use crate::board::{Board, MoveInfo};
use crate::coretypes::{Color, Move};
use crate::error::{self, ErrorKind};
use crate::movelist::MoveHistory;

/// How a finished game ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner: Color::White } => write!(f, "checkmate, white wins"),
            Outcome::Checkmate { winner: Color::Black } => write!(f, "checkmate, black wins"),
            Outcome::Stalemate => write!(f, "stalemate, draw"),
        }
    }
}

/// Game contains information for an in progress game:
/// The base board the game started from, the sequence of moves that were
/// played, and the current board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    pub base_board: Board,
    pub moves: MoveHistory,
    pub board: Board,
    undo_stack: Vec<MoveInfo>,
}

impl Game {
    /// Create a new Game from a base board and a sequence of moves.
    /// This generates the current board by applying the sequence of moves to the base.
    /// If a move in the move history was illegal, Err is returned.
    pub fn new(base_board: Board, moves: MoveHistory) -> error::Result<Self> {
        let mut game = Self::from(base_board);
        for move_ in moves {
            game.play(move_)?;
        }
        Ok(game)
    }

    /// Create a new game in the standard chess start position.
    pub fn start_position() -> Self {
        Self::from(Board::start_position())
    }

    /// Plays a move for the side to move if it is legal.
    /// The move recorded in history is the legal move it matched, with flags set.
    pub fn play(&mut self, move_: Move) -> error::Result<Move> {
        let move_info = self.board.make_legal_move(move_)?;
        self.moves.push(move_info.move_());
        self.undo_stack.push(move_info);
        Ok(move_info.move_())
    }

    /// Parses a move in coordinate notation such as `e2e4` and plays it.
    pub fn play_text(&mut self, text: &str) -> error::Result<Move> {
        self.play(text.parse()?)
    }

    /// Takes back the last move played.
    pub fn undo(&mut self) -> error::Result<Move> {
        let move_info = self.undo_stack.pop().ok_or(ErrorKind::NothingToUndo)?;
        self.moves.pop();
        self.board.undo_move(move_info);
        Ok(move_info.move_())
    }

    /// Color of the player to move.
    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    /// Returns how the game ended, or None if the side to move has a legal move.
    pub fn outcome(&self) -> Option<Outcome> {
        let turn = self.board.turn();
        if self.board.has_legal_move(turn) {
            None
        } else if self.board.is_in_check(turn) {
            Some(Outcome::Checkmate { winner: !turn })
        } else {
            Some(Outcome::Stalemate)
        }
    }
}

/// Convert a board to a Game with no past moves.
impl From<Board> for Game {
    fn from(board: Board) -> Self {
        Self {
            base_board: board,
            moves: MoveHistory::new(),
            board,
            undo_stack: Vec::new(),
        }
    }
}
