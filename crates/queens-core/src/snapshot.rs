//! Value-semantic copies of a board's cell statuses.
//!
//! Snapshots never alias live grid state. They drive change detection
//! between solve rounds and are the contract external renderers consume.

use serde::{Deserialize, Serialize};

use crate::grid::CellStatus;
use crate::Position;

/// Row-major copy of every cell status at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    width: usize,
    height: usize,
    statuses: Vec<CellStatus>,
}

impl Snapshot {
    pub(crate) fn new(width: usize, height: usize, statuses: Vec<CellStatus>) -> Self {
        debug_assert_eq!(statuses.len(), width * height);
        Self {
            width,
            height,
            statuses,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn status_at(&self, pos: Position) -> CellStatus {
        self.statuses[pos.y * self.width + pos.x]
    }

    /// Row-major matrix of statuses, rows top to bottom.
    pub fn rows(&self) -> Vec<Vec<CellStatus>> {
        self.statuses
            .chunks(self.width)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    /// True if any cell status differs. Differently shaped boards always
    /// differ.
    pub fn differs_from(&self, other: &Snapshot) -> bool {
        self.width != other.width || self.height != other.height || self.statuses != other.statuses
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.statuses.chunks(self.width) {
            for status in row {
                write!(f, "{}", status.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
