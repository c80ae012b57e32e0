//! Iterative Deepening Search.

use std::time::{Duration, Instant};

use log::debug;

use super::{alpha_beta, static_ply, SearchResult};
use crate::board::Board;
use crate::coretypes::{Color, MAX_DEPTH};
use crate::eval::Evaluation;
use crate::timeman::{self, Mode};

/// Searches game tree with increasing depth until `movetime` runs out.
/// Each depth is a full alpha-beta search sharing the same deadline.
/// It returns the result of the last depth that completed; a depth aborted by
/// the deadline is discarded because its bounds are unreliable.
/// If no depth completes, each root move is statically evaluated instead and the
/// result is flagged as stopped.
/// Returns None if `player` has no legal moves.
pub fn ids(
    board: &mut Board,
    player: Color,
    movetime: Duration,
    evaluation: Evaluation,
) -> Option<SearchResult> {
    let start = Instant::now();
    let deadline = Mode::movetime(movetime).deadline(start);

    let mut completed: Option<SearchResult> = None;
    let mut nodes = 0;

    for ids_ply in 1..=MAX_DEPTH {
        let search_result = alpha_beta(board, player, ids_ply, evaluation, deadline)?;
        nodes += search_result.nodes;

        if search_result.stopped {
            debug!(
                "ids depth {ids_ply} aborted by deadline after {} nodes",
                search_result.nodes
            );
            break;
        }

        debug!(
            "ids depth {ids_ply} best {} score {} nodes {} elapsed {:?}",
            search_result.best_move,
            search_result.score,
            search_result.nodes,
            start.elapsed()
        );
        let is_mate = search_result.score.is_mate();
        completed = Some(search_result);

        // A forced mate is found at the shallowest depth it exists, searching deeper cannot change it.
        if is_mate || timeman::is_out_of_time(deadline) {
            break;
        }
    }

    let mut search_result = match completed {
        Some(search_result) => search_result,
        None => {
            debug!("ids completed no depth, falling back to static evaluation");
            let search_result = static_ply(board, player, evaluation)?;
            nodes += search_result.nodes;
            search_result
        }
    };

    // Update values with those tracked in top level.
    search_result.nodes = nodes;
    search_result.elapsed = start.elapsed();
    Some(search_result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::{Cp, Move, Square::*};
    use crate::fen::Fen;

    #[test]
    fn ids_completes_depths_within_time() {
        let mut board = Board::start_position();
        let before = board;
        let result = ids(&mut board, Color::White, Duration::from_millis(300), Evaluation::Material).unwrap();
        assert!(result.depth >= 1);
        assert!(!result.stopped);
        assert!(board.is_legal_move(result.best_move));
        assert_eq!(board, before);
    }

    #[test]
    fn ids_stops_at_mate() {
        let mut board = Board::parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - -").unwrap();
        let result = ids(&mut board, Color::White, Duration::from_secs(5), Evaluation::Material).unwrap();
        assert_eq!(result.best_move, Move::new(A1, A8, None));
        assert_eq!(result.depth, 1);
        assert_eq!(result.score, Cp::mate_in(1));
    }

    #[test]
    fn zero_movetime_falls_back_to_static_ply() {
        let mut board = Board::parse_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - -").unwrap();
        let before = board;
        let result = ids(&mut board, Color::White, Duration::ZERO, Evaluation::Material).unwrap();
        assert!(result.stopped);
        assert_eq!(result.depth, 0);
        assert_eq!(result.best_move, Move::new(D2, D5, None));
        assert_eq!(board, before);
    }
}
