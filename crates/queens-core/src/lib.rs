//! queens-core
//!
//! Deduction engine for the Queens grid puzzle: an N×N board partitioned
//! into N color regions, exactly one queen per row, per column, and per
//! region, with no two queens adjacent (diagonals included). The solver
//! applies human-style inference rules to a fixed point and reports
//! `Solved` or `Stuck` — it never guesses or backtracks.

mod cellset;
mod grid;
mod puzzle;
mod region;
mod snapshot;
pub mod solver;

// Re-export main types for convenience
pub use cellset::CellSet;
pub use grid::{Axis, CellStatus, Grid};
pub use puzzle::{PuzzleDefinition, PuzzleError, RegionId, MAX_SIDE};
pub use region::{Holdings, Region};
pub use snapshot::Snapshot;
pub use solver::{Rule, SolveReport, SolveState, SolveStep, Solver, SolverConfig};

use serde::{Deserialize, Serialize};

/// A cell coordinate. `x` runs left to right, `y` top to bottom; the origin
/// is the top-left corner of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Create a position from its coordinates.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
