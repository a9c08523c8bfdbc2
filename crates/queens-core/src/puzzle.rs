//! Puzzle definition contract and validation.
//!
//! A definition is a rectangular matrix of region color tokens plus declared
//! row and column counts. Validation happens here; geometry and state live
//! in [`crate::Grid`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Position;

/// Largest validated board side. Larger grids are not a goal of this engine.
pub const MAX_SIDE: usize = 20;

/// Input token meaning "no explicit color chosen".
const NO_COLOR_SENTINEL: &str = "SystemButtonFace";

/// Region identifier the sentinel normalizes to.
const DEFAULT_REGION: &str = "FFFFFF";

/// Opaque comparable region token, e.g. a 6-character color hex like `FF0010`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(String);

impl RegionId {
    /// Wrap a token verbatim.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Normalize a raw input token: the "no color chosen" sentinel maps to
    /// the fixed default identifier, and a leading `#` is stripped from
    /// hex-style tokens. Anything else passes through untouched.
    pub fn normalized(raw: &str) -> Self {
        if raw == NO_COLOR_SENTINEL {
            return Self(DEFAULT_REGION.to_string());
        }
        Self(raw.strip_prefix('#').unwrap_or(raw).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construction-time validation errors. A failed construction never leaves
/// a partially built grid behind.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleError {
    /// The color matrix shape disagrees with the declared counts.
    #[error("color matrix is {found_rows} rows with a row of {found_cols} cells, declared {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// The win condition assumes a square board.
    #[error("board must be square, got {rows} rows by {cols} columns")]
    NonSquareGrid { rows: usize, cols: usize },

    /// A side falls outside the validated range.
    #[error("board side must be within 1..={MAX_SIDE}, got {rows} rows by {cols} columns")]
    SideOutOfRange { rows: usize, cols: usize },

    /// A cell list does not cover the declared rectangle exactly once.
    #[error("cell list does not cover a {width}x{height} rectangle exactly once")]
    InvalidDimensions { width: usize, height: usize },
}

/// The puzzle input contract: declared dimensions plus a matrix of region
/// color tokens, listed row by row from the top, each row left to right.
///
/// Field names match the structured-text form the original tooling emits,
/// so existing definitions deserialize directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub rows: usize,
    pub cols: usize,
    pub colors: Vec<Vec<String>>,
}

impl PuzzleDefinition {
    pub fn new(rows: usize, cols: usize, colors: Vec<Vec<String>>) -> Self {
        Self { rows, cols, colors }
    }

    /// Check dimensions: sides in range, square, matrix shape matching the
    /// declared counts (ragged rows are a mismatch).
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.rows < 1 || self.rows > MAX_SIDE || self.cols < 1 || self.cols > MAX_SIDE {
            return Err(PuzzleError::SideOutOfRange {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows != self.cols {
            return Err(PuzzleError::NonSquareGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.colors.len() != self.rows {
            return Err(PuzzleError::DimensionMismatch {
                rows: self.rows,
                cols: self.cols,
                found_rows: self.colors.len(),
                found_cols: self.colors.first().map_or(0, Vec::len),
            });
        }
        for row in &self.colors {
            if row.len() != self.cols {
                return Err(PuzzleError::DimensionMismatch {
                    rows: self.rows,
                    cols: self.cols,
                    found_rows: self.colors.len(),
                    found_cols: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Iterate all cells with normalized region identifiers, row-major.
    pub(crate) fn cells(&self) -> impl Iterator<Item = (Position, RegionId)> + '_ {
        self.colors.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, token)| (Position::new(x, y), RegionId::normalized(token)))
        })
    }
}
