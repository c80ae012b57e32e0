//! Holds Board struct, the most important data structure for the engine.
//! Board represents a chess position and is the single source of truth for it,
//! FEN text is only ever derived from it.

use std::fmt::{self, Display};
use std::str::FromStr;

use log::trace;

use crate::coretypes::{Castling, Color, Move, Piece, PieceKind, Square};
use crate::error::{self, ErrorKind};
use crate::fen::Fen;
use crate::mailbox::Mailbox;
use crate::movegen as mg;
use crate::movelist::{MoveList, PieceMoveList};

/// struct Board
/// A complete data set that can represent any chess position.
/// # Members:
/// * state - a square-centric container of all pieces on the board.
/// * turn - Color of player whose turn it is.
/// * castling - Castling rights for both players.
/// * en_passant - Square passed over by the last double pawn push, if the last move was one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    pub(crate) state: Mailbox,
    pub(crate) turn: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
}

/// MoveInfo is the delta recorded when a move is made.
/// Passing it back to `Board::undo_move` restores the exact prior Board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveInfo {
    pub(crate) move_: Move,
    pub(crate) moved: Option<Piece>,
    pub(crate) captured: Option<Piece>,
    pub(crate) captured_square: Square,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) turn: Color,
}

impl MoveInfo {
    pub fn move_(&self) -> Move {
        self.move_
    }
    /// The piece that was removed from the board by this move, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl Board {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        Self {
            state: Mailbox::start_position(),
            turn: Color::White,
            castling: Castling::start_position(),
            en_passant: None,
        }
    }

    /// Board with no pieces on it, white to move and no castling rights.
    pub fn empty() -> Self {
        Self {
            state: Mailbox::new(),
            turn: Color::White,
            castling: Castling::NONE,
            en_passant: None,
        }
    }

    /// Const getters.
    pub fn state(&self) -> &Mailbox {
        &self.state
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn castling(&self) -> Castling {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Sets or clears a single square. No legality checks are made, so it is up
    /// to the caller to keep castling rights and en passant consistent with the pieces.
    pub fn place_piece(&mut self, piece: Option<Piece>, square: Square) {
        self.state[square] = piece;
    }

    /// Apply a move to self, in place.
    /// `make_move` does not check if the move is legal or not,
    /// it simply executes it while assuming legality.
    /// The returned MoveInfo undoes the move when passed to `undo_move`.
    ///
    /// Side effects:
    /// * castling also moves the wing's rook.
    /// * en passant removes the passed pawn.
    /// * a pawn reaching its last rank becomes the move's promotion piece, a Queen if unspecified.
    /// * a king move clears both castling rights of its color.
    /// * any move from or onto a corner square clears that corner's castling right.
    /// * en passant square is set after a double pawn push, cleared otherwise.
    /// * turn passes to the other color.
    ///
    /// If `from` is empty, only the en passant square and turn change.
    pub fn make_move(&mut self, move_: Move) -> MoveInfo {
        let moved = self.state[move_.from];
        let captured_square = match (move_.en_passant, moved) {
            (true, Some(piece)) => move_
                .to
                .offset(0, -piece.color.pawn_direction())
                .unwrap_or(move_.to),
            _ => move_.to,
        };
        let move_info = MoveInfo {
            move_,
            moved,
            captured: self.state[captured_square],
            captured_square,
            castling: self.castling,
            en_passant: self.en_passant,
            turn: self.turn,
        };

        self.en_passant = None;
        self.turn = !self.turn;

        let piece = match moved {
            Some(piece) => piece,
            None => return move_info,
        };

        self.state[move_.from] = None;
        self.state[captured_square] = None;
        self.state[move_.to] = match piece.piece_kind {
            PieceKind::Pawn if move_.to.rank() == piece.color.promotion_rank() => Some(Piece::new(
                piece.color,
                move_.promotion.unwrap_or(PieceKind::Queen),
            )),
            _ => Some(piece),
        };

        if move_.castling {
            if let Some((rook_from, rook_to)) = mg::castling_rook_squares(move_.to) {
                self.state[rook_to] = self.state[rook_from].take();
            }
        }

        if piece.piece_kind == PieceKind::King {
            self.castling.clear_color(piece.color);
        }
        for corner in [move_.from, move_.to] {
            if let Some(rights) = Castling::for_rook_square(corner) {
                self.castling.clear(rights);
            }
        }

        if piece.piece_kind == PieceKind::Pawn
            && move_.from.rank_u8().abs_diff(move_.to.rank_u8()) == 2
        {
            self.en_passant = move_.from.offset(0, piece.color.pawn_direction());
        }

        move_info
    }

    /// Undo the application of a move, in place.
    /// `move_info` must come from the latest `make_move` on this board that has not been undone.
    pub fn undo_move(&mut self, move_info: MoveInfo) {
        let move_ = move_info.move_;

        if move_info.moved.is_some() {
            if move_.castling {
                if let Some((rook_from, rook_to)) = mg::castling_rook_squares(move_.to) {
                    self.state[rook_from] = self.state[rook_to].take();
                }
            }
            self.state[move_.to] = None;
            self.state[move_info.captured_square] = move_info.captured;
            self.state[move_.from] = move_info.moved;
        }

        self.castling = move_info.castling;
        self.en_passant = move_info.en_passant;
        self.turn = move_info.turn;
    }

    /// Checks that the move is legal for the side to move before applying it.
    /// The move is looked up by its squares (and promotion, if given) in the legal
    /// move list, so flags do not need to be set by the caller.
    /// Returns the applied legal Move's MoveInfo, or an IllegalMove error with self unchanged.
    pub fn make_legal_move(&mut self, move_: Move) -> error::Result<MoveInfo> {
        match self.find_legal_move(move_) {
            Some(legal_move) => Ok(self.make_move(legal_move)),
            None => {
                trace!("rejected illegal move {move_} in {}", self.to_fen());
                Err((ErrorKind::IllegalMove, move_).into())
            }
        }
    }

    /// Returns the legal move of the side to move which matches the squares of `move_`.
    pub fn find_legal_move(&self, move_: Move) -> Option<Move> {
        self.find_legal_moves(move_.from, self.turn)
            .into_iter()
            .find(|legal_move| legal_move.matches(&move_))
    }

    /// Returns true if the move is legal for the side to move.
    pub fn is_legal_move(&self, move_: Move) -> bool {
        self.find_legal_move(move_).is_some()
    }

    /// Locates the king of a color.
    /// A legal position has exactly one. If there are several the lowest indexed
    /// is returned, and if there are none then None.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Some(Piece::new(color, PieceKind::King));
        Square::iter().find(|&square| self.state[square] == king)
    }

    /// Returns true if a king of `color` is attacked by any opposing piece.
    /// A color without a king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .map_or(false, |king| mg::is_attacked(&self.state, king, !color))
    }

    /// Same answer as `is_in_check`, found by generating every opposing
    /// pseudo-legal move and testing if any lands on the king.
    pub fn is_in_check_by_generation(&self, color: Color) -> bool {
        let king = match self.find_king(color) {
            Some(king) => king,
            None => return false,
        };
        self.state.pieces().any(|(square, piece)| {
            piece.color != color
                && mg::pseudo_legal_moves(self, square, !color)
                    .iter()
                    .any(|move_| move_.to == king)
        })
    }

    /// Returns true if `color` is in check and has no legal moves.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Returns true if `color` is not in check and has no legal moves.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Returns the legal moves of the piece of `color` on `square`.
    /// Each pseudo-legal move is applied to a scratch copy, tested for leaving
    /// the mover's king in check, and undone.
    /// Castling is also rejected when the king is in check or passes over an attacked square.
    pub fn find_legal_moves(&self, square: Square, color: Color) -> PieceMoveList {
        let mut scratch = *self;
        let mut legal_moves = mg::pseudo_legal_moves(self, square, color);
        legal_moves.retain(|move_| scratch.is_legal_for(*move_, color));
        debug_assert_eq!(&scratch, self);
        legal_moves
    }

    /// Returns every legal move of `color`, in square order.
    pub fn find_all_legal_moves(&self, color: Color) -> MoveList {
        let mut scratch = *self;
        let mut legal_moves = MoveList::new();

        for (square, piece) in self.state.pieces() {
            if piece.color != color {
                continue;
            }
            for move_ in mg::pseudo_legal_moves(self, square, color) {
                if scratch.is_legal_for(move_, color) {
                    legal_moves.push(move_);
                }
            }
        }

        debug_assert_eq!(&scratch, self);
        legal_moves
    }

    /// Returns true if `color` has at least one legal move, stopping at the first found.
    pub fn has_legal_move(&self, color: Color) -> bool {
        let mut scratch = *self;
        self.state.pieces().any(|(square, piece)| {
            piece.color == color
                && mg::pseudo_legal_moves(self, square, color)
                    .into_iter()
                    .any(|move_| scratch.is_legal_for(move_, color))
        })
    }

    /// Check-filter of a single pseudo-legal move. Self is restored before returning.
    fn is_legal_for(&mut self, move_: Move, color: Color) -> bool {
        if move_.castling {
            let transit_attacked = mg::castling_transit(move_.to)
                .map_or(false, |transit| mg::is_attacked(&self.state, transit, !color));
            if transit_attacked || self.is_in_check(color) {
                return false;
            }
        }

        let move_info = self.make_move(move_);
        let is_legal = !self.is_in_check(color);
        self.undo_move(move_info);
        is_legal
    }
}

/// Defaults to standard chess start position.
impl Default for Board {
    fn default() -> Self {
        Self::start_position()
    }
}

impl FromStr for Board {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        Ok(Self::parse_fen(s)?)
    }
}

/// Displays pretty-printed chess board and Fen string representing Board.
impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n Fen: {}\n", self.state, self.to_fen())
    }
}
