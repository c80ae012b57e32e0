//! MoveList types used in Rookie engine.
//!
//! The underlying type of MoveList may change at any time during
//! pre-1.0 development, so a MoveList type alias makes changes easy.

use arrayvec::ArrayVec;

use crate::coretypes::{Move, MAX_MOVES};

/// Most pseudo-legal moves a single piece can have, a centralized queen reaches 27.
pub const MAX_PIECE_MOVES: usize = 32;

/// MoveList is a container that can hold at most `MAX_MOVES`, the most number of moves per any chess position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;
/// PieceMoveList holds the moves of a single piece on a single square.
pub type PieceMoveList = ArrayVec<Move, MAX_PIECE_MOVES>;
/// MoveHistory is the sequence of moves played in a game.
pub type MoveHistory = Vec<Move>;
