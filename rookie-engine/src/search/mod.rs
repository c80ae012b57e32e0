//! Search functions.
//!
//! Every search treats the root player as the maximizing player, so scores are
//! relative to the root player: positive is good for the player being searched for.
//! Searches borrow the board mutably for their whole duration. Each move applied
//! during a search is undone before returning, leaving the board bit-identical.

mod alpha_beta;
mod ids;
mod minimax;

pub use alpha_beta::*;
pub use ids::*;
pub use minimax::*;

use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use log::debug;

use crate::board::Board;
use crate::coretypes::{Color, Cp, Move, PlyKind};
use crate::eval::{self, Evaluation};
use crate::timeman::{self, Mode};

/// The results found from running a search on some root position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move to make for a position discovered from search.
    pub best_move: Move,
    /// The centipawn score of making the best move, relative to `player`.
    pub score: Cp,
    /// The player the root position was searched for.
    pub player: Color,
    /// Depth in plies that was searched. This depth is only fully searched if `stopped` flag is false.
    pub depth: PlyKind,
    /// Total number of nodes visited in a search.
    pub nodes: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
    /// Flag that indicates this search was aborted by its deadline.
    pub stopped: bool,
}

impl SearchResult {
    /// Get average nodes per second of search.
    pub fn nps(&self) -> f64 {
        match self.elapsed.is_zero() {
            true => 0.0,
            false => (self.nodes as f64 / self.elapsed.as_secs_f64()).round(),
        }
    }

    /// Returns the color who is leading in the search of the root position, or None if even.
    pub fn leading(&self) -> Option<Color> {
        match self.score.signum() {
            1 => Some(self.player),
            -1 => Some(!self.player),
            _ => None,
        }
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SearchResult {{")?;
        writeln!(f, "    best_move: {}", self.best_move)?;
        writeln!(f, "    score    : {}", self.score)?;
        writeln!(f, "    player   : {}", self.player)?;
        writeln!(f, "    depth    : {}", self.depth)?;
        writeln!(f, "    nodes    : {}", self.nodes)?;
        writeln!(f, "    nps      : {}", self.nps())?;
        writeln!(
            f,
            "    elapsed  : {}.{:03}s",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        )?;
        writeln!(f, "    stopped  : {}", self.stopped)?;
        write!(f, "}}")
    }
}

/// Settings for a single search.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SearchConfig {
    /// Fixed depth, or iterative deepening against a move time.
    pub mode: Mode,
    /// Terms of the static evaluation used at leaves.
    pub evaluation: Evaluation,
}

impl SearchConfig {
    pub fn new(mode: Mode, evaluation: Evaluation) -> Self {
        Self { mode, evaluation }
    }
}

/// Rookie Engine primary board search function.
/// Depth mode runs a single alpha-beta search to that depth.
/// MoveTime mode runs iterative deepening until the move time runs out.
/// Returns None if `player` has no legal moves.
pub fn search(board: &mut Board, player: Color, config: SearchConfig) -> Option<SearchResult> {
    let result = match config.mode {
        Mode::Depth(_) => alpha_beta(
            board,
            player,
            config.mode.max_depth(),
            config.evaluation,
            None,
        ),
        Mode::MoveTime(movetime) => ids(board, player, movetime, config.evaluation),
    };

    if let Some(result) = &result {
        debug!(
            "search {} for {}: best {} score {} depth {} nodes {} in {:?}",
            config.mode,
            player,
            result.best_move,
            result.score,
            result.depth,
            result.nodes,
            result.elapsed
        );
    }
    result
}

/// Returns the best move found for `player`, or None if it has no legal moves.
pub fn get_best_move(board: &mut Board, player: Color, config: SearchConfig) -> Option<Move> {
    search(board, player, config).map(|result| result.best_move)
}

/// One ply without a deadline: each legal move is applied and the resulting board
/// statically evaluated, or scored as terminal if the opponent is left without moves.
/// The result has depth 0 and is flagged as stopped.
fn static_ply(board: &mut Board, player: Color, evaluation: Evaluation) -> Option<SearchResult> {
    let start = Instant::now();
    let mut context = Context::new(player, evaluation, None);
    let mut best: Option<(Cp, Move)> = None;

    for legal_move in board.find_all_legal_moves(player) {
        context.nodes += 1;
        let move_info = board.make_move(legal_move);
        let move_cp = context.leaf(board, !player, 1);
        board.undo_move(move_info);

        if best.map_or(true, |(best_cp, _)| move_cp > best_cp) {
            best = Some((move_cp, legal_move));
        }
    }

    let (score, best_move) = best?;
    let mut search_result = context.into_result(best_move, score, 0, start);
    search_result.stopped = true;
    Some(search_result)
}

/// State shared by the nodes of one search.
struct Context {
    root: Color,
    evaluation: Evaluation,
    deadline: Option<Instant>,
    nodes: u64,
    stopped: bool,
}

impl Context {
    fn new(root: Color, evaluation: Evaluation, deadline: Option<Instant>) -> Self {
        Self {
            root,
            evaluation,
            deadline,
            nodes: 0,
            stopped: false,
        }
    }

    /// Color to move at a node, where the root player is the maximizer.
    fn mover<const MAXIMIZING: bool>(&self) -> Color {
        match MAXIMIZING {
            true => self.root,
            false => !self.root,
        }
    }

    /// Latches `stopped` once the deadline passes.
    fn out_of_time(&mut self) -> bool {
        if !self.stopped && timeman::is_out_of_time(self.deadline) {
            self.stopped = true;
        }
        self.stopped
    }

    /// Score of a leaf, a terminal score if `mover` has no legal moves,
    /// otherwise the static evaluation.
    fn leaf(&self, board: &Board, mover: Color, ply: PlyKind) -> Cp {
        match board.has_legal_move(mover) {
            true => eval::evaluate(board, self.root, self.evaluation),
            false => eval::terminal(board, self.root, mover, ply),
        }
    }

    fn into_result(self, best_move: Move, score: Cp, depth: PlyKind, start: Instant) -> SearchResult {
        SearchResult {
            best_move,
            score,
            player: self.root,
            depth,
            nodes: self.nodes,
            elapsed: start.elapsed(),
            stopped: self.stopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Square::*;
    use crate::fen::Fen;

    #[test]
    fn search_leaves_board_unchanged() {
        let mut board =
            Board::parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
                .unwrap();
        let before = board;

        let config = SearchConfig::new(Mode::depth(2), Evaluation::Material);
        let result = search(&mut board, Color::White, config).unwrap();
        assert_eq!(board, before);
        assert_eq!(result.depth, 2);
        assert!(!result.stopped);
        assert!(board.is_legal_move(result.best_move));
    }

    #[test]
    fn no_legal_moves_returns_none() {
        let mut board = Board::parse_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - -").unwrap();
        let config = SearchConfig::new(Mode::depth(3), Evaluation::Material);
        assert_eq!(get_best_move(&mut board, Color::Black, config), None);

        let config = SearchConfig::new(Mode::movetime(Duration::from_millis(20)), Evaluation::Material);
        assert_eq!(get_best_move(&mut board, Color::Black, config), None);
    }

    #[test]
    fn search_for_either_color() {
        // Black to move on the board, but the search asks for White.
        let mut board = Board::parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 b - -").unwrap();
        let config = SearchConfig::new(Mode::depth(2), Evaluation::Material);
        let result = search(&mut board, Color::White, config).unwrap();
        assert_eq!(result.best_move, Move::new(A1, A8, None));
        assert_eq!(result.score, Cp::mate_in(1));
        assert_eq!(result.leading(), Some(Color::White));
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn nps_of_empty_search_is_zero() {
        let result = SearchResult {
            best_move: Move::new(E2, E4, None),
            score: Cp(0),
            player: Color::White,
            depth: 1,
            nodes: 100,
            elapsed: Duration::ZERO,
            stopped: false,
        };
        assert_eq!(result.nps(), 0.0);
        assert_eq!(result.leading(), None);
        assert!(result.to_string().contains("best_move: e2e4"));
    }
}
