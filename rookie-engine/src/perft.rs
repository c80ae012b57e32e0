//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of nodes at a specific depth.

use std::ops::{Add, AddAssign};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use crate::board::Board;
use crate::coretypes::PlyKind;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

// Count the number of nodes at a certain depth, for the side to move on `board`.
// This ignores higher terminal nodes.
// In other words, it counts the number of paths to the given depth.
pub fn perft(mut board: Board, ply: PlyKind, threads: usize) -> PerftInfo {
    // Guard easy to calculate inputs.
    if ply == 0 {
        // Ever only 1 position at 0 ply.
        return PerftInfo::new(1);
    } else if ply <= 2 || threads <= 1 {
        // Simple enough to not require threads, or single threaded.
        return perft_recurse(&mut board, ply);
    }
    debug_assert!(ply > 2);
    debug_assert!(threads > 1);

    let legal_moves = board.find_all_legal_moves(board.turn());
    let next_move = AtomicUsize::new(0);
    let total_nodes = AtomicU64::new(0);

    // Each thread steals one root move at a time until none are left.
    thread::scope(|scope| {
        for _ in 0..threads.min(legal_moves.len()) {
            scope.spawn(|| {
                let mut board = board;
                let mut perft_info = PerftInfo::new(0);

                while let Some(&move_) = legal_moves.get(next_move.fetch_add(1, Ordering::Relaxed)) {
                    let move_info = board.make_move(move_);
                    perft_info += perft_recurse(&mut board, ply - 1);
                    board.undo_move(move_info);
                }

                total_nodes.fetch_add(perft_info.nodes, Ordering::Relaxed);
            });
        }
    });

    PerftInfo::new(total_nodes.into_inner())
}

/// Ply must be non-zero.
fn perft_recurse(board: &mut Board, ply: PlyKind) -> PerftInfo {
    debug_assert_ne!(ply, 0);
    let legal_moves = board.find_all_legal_moves(board.turn());

    if ply == 1 {
        // If we reach the depth before the end,
        // return the count of legal moves.
        PerftInfo::new(legal_moves.len() as u64)
    } else {
        let mut perft_info = PerftInfo::new(0);
        for legal_move in legal_moves {
            let move_info = board.make_move(legal_move);
            perft_info += perft_recurse(board, ply - 1);
            board.undo_move(move_info);
        }
        perft_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_start_position_shallow() {
        let board = Board::start_position();
        assert_eq!(perft(board, 0, 1).nodes, 1);
        assert_eq!(perft(board, 1, 1).nodes, 20);
        assert_eq!(perft(board, 2, 1).nodes, 400);
    }

    #[test]
    fn threads_agree_with_single_thread() {
        let board = Board::start_position();
        assert_eq!(perft(board, 3, 1), perft(board, 3, 4));
        assert_eq!(perft(board, 3, 64).nodes, 8_902);
    }
}
