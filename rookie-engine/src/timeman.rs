//! Time Management

use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use crate::coretypes::{PlyKind, MAX_DEPTH};

const OVERHEAD: Duration = Duration::from_millis(5); // Expected amount of time loss unwinding a search.
const DEFAULT_MOVETIME: Duration = Duration::from_millis(1000);

/// Returns true if a deadline exists and has been reached.
pub fn is_out_of_time(deadline: Option<Instant>) -> bool {
    deadline.map_or(false, |deadline| Instant::now() >= deadline)
}

/// There are 2 supported search modes, Depth and MoveTime.
/// Depth mode: search to exactly a given depth, with no time limit.
/// MoveTime mode: search deeper and deeper until a specified time per move runs out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    Depth(PlyKind),     // Search to a given depth.
    MoveTime(Duration), // Search for a specified amount of time.
}

impl Mode {
    /// Returns a new Depth Mode, with depth bounded to 1..=MAX_DEPTH.
    pub fn depth(ply: PlyKind) -> Self {
        Self::Depth(ply.clamp(1, MAX_DEPTH))
    }

    /// Returns a new MoveTime mode.
    pub fn movetime(movetime: Duration) -> Self {
        Self::MoveTime(movetime)
    }

    /// Deepest ply a search in this mode may reach.
    pub fn max_depth(&self) -> PlyKind {
        match self {
            Mode::Depth(ply) => (*ply).clamp(1, MAX_DEPTH),
            Mode::MoveTime(_) => MAX_DEPTH,
        }
    }

    /// Instant a search started at `start_time` must stop by, if it has one.
    pub fn deadline(&self, start_time: Instant) -> Option<Instant> {
        match self {
            Mode::Depth(_) => None,
            Mode::MoveTime(movetime) => Some(start_time + movetime.saturating_sub(OVERHEAD)),
        }
    }
}

/// Defaults to a one second move time.
impl Default for Mode {
    fn default() -> Self {
        Self::MoveTime(DEFAULT_MOVETIME)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Depth(ply) => write!(f, "depth {ply}"),
            Mode::MoveTime(movetime) => write!(f, "movetime {}ms", movetime.as_millis()),
        }
    }
}
