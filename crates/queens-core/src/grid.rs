//! Grid model: cell statuses, region membership, and the geometric query
//! at the heart of every rule ("what would this placement eliminate").
//!
//! Geometry and region membership are immutable after construction and
//! shared between hypothesis forks through an `Arc`; only the status vector
//! is per-instance. All mutation flows through [`Grid::place_queen`] and
//! the rule entry points, so the monotone status transitions stay
//! centralized.

use std::sync::Arc;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::cellset::CellSet;
use crate::puzzle::{PuzzleDefinition, PuzzleError, RegionId};
use crate::region::Region;
use crate::snapshot::Snapshot;
use crate::Position;

/// The three cell states. `Blank` is undetermined, `Crossed` proven
/// ineligible, `Queen` a committed placement. Transitions are monotone:
/// Blank may become Crossed or Queen; both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    Blank,
    Crossed,
    Queen,
}

impl CellStatus {
    /// Display symbol used by the text rendering of a board.
    pub fn symbol(self) -> char {
        match self {
            CellStatus::Blank => ' ',
            CellStatus::Crossed => 'x',
            CellStatus::Queen => '\u{2655}', // ♕
        }
    }
}

impl std::fmt::Display for CellStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Row/column selector for the axis-parameterized rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Row, Axis::Col];

    /// The coordinate of `pos` along this axis: the row number for `Row`,
    /// the column number for `Col`.
    pub fn index_of(self, pos: Position) -> usize {
        match self {
            Axis::Row => pos.y,
            Axis::Col => pos.x,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

/// Immutable board geometry: dimensions, per-cell region membership, and
/// the region table. Shared by every hypothesis fork of a [`Grid`].
#[derive(Debug)]
pub struct GridLayout {
    width: usize,
    height: usize,
    region_of: Vec<usize>,
    regions: Vec<Region>,
}

/// The Queens board: shared layout plus per-cell statuses.
///
/// `Clone` copies only the status vector and bumps the layout refcount,
/// which is what keeps lookahead branches cheap.
#[derive(Debug, Clone)]
pub struct Grid {
    layout: Arc<GridLayout>,
    statuses: Vec<CellStatus>,
}

impl Grid {
    /// Build a grid from a validated puzzle definition.
    pub fn from_definition(def: &PuzzleDefinition) -> Result<Self, PuzzleError> {
        def.validate()?;
        Self::from_cells(def.cols, def.rows, def.cells().collect())
    }

    /// Build a grid from an explicit cell list. The list must cover the
    /// `width` x `height` rectangle exactly once; region count is not
    /// validated here (the win condition is only meaningful for square
    /// boards with `height` regions, but rules run on anything).
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<(Position, RegionId)>,
    ) -> Result<Self, PuzzleError> {
        let invalid = || PuzzleError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(invalid());
        }

        let cell_count = width * height;
        let mut region_of = vec![usize::MAX; cell_count];
        let mut region_ids: Vec<RegionId> = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (pos, id) in cells {
            if pos.x >= width || pos.y >= height {
                return Err(invalid());
            }
            let idx = pos.y * width + pos.x;
            if region_of[idx] != usize::MAX {
                // Covered twice
                return Err(invalid());
            }
            let region = match region_ids.iter().position(|known| *known == id) {
                Some(r) => r,
                None => {
                    region_ids.push(id);
                    members.push(Vec::new());
                    region_ids.len() - 1
                }
            };
            region_of[idx] = region;
            members[region].push(idx);
        }
        debug_assert!(region_of.iter().all(|&r| r != usize::MAX));

        let regions = region_ids
            .into_iter()
            .zip(members)
            .map(|(id, cells)| Region::new(id, cells))
            .collect();

        Ok(Self {
            layout: Arc::new(GridLayout {
                width,
                height,
                region_of,
                regions,
            }),
            statuses: vec![CellStatus::Blank; cell_count],
        })
    }

    // ==================== Geometry accessors ====================

    pub fn width(&self) -> usize {
        self.layout.width
    }

    pub fn height(&self) -> usize {
        self.layout.height
    }

    pub fn cell_count(&self) -> usize {
        self.statuses.len()
    }

    /// Linear index of a position.
    pub fn index_of(&self, pos: Position) -> usize {
        debug_assert!(pos.x < self.width() && pos.y < self.height());
        pos.y * self.width() + pos.x
    }

    /// Position of a linear index.
    pub fn position_of(&self, idx: usize) -> Position {
        Position::new(idx % self.width(), idx / self.width())
    }

    /// Cell indices along `axis` at `line`: a full row for `Axis::Row`, a
    /// full column for `Axis::Col`.
    pub fn line_cells(&self, axis: Axis, line: usize) -> Vec<usize> {
        match axis {
            Axis::Row => (0..self.width()).map(|x| line * self.width() + x).collect(),
            Axis::Col => (0..self.height()).map(|y| y * self.width() + line).collect(),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.layout.regions
    }

    pub fn region(&self, index: usize) -> &Region {
        &self.layout.regions[index]
    }

    /// Registry index of the region owning a cell.
    pub fn region_index_of(&self, idx: usize) -> usize {
        self.layout.region_of[idx]
    }

    // ==================== Status accessors ====================

    pub fn status(&self, idx: usize) -> CellStatus {
        self.statuses[idx]
    }

    pub fn status_at(&self, pos: Position) -> CellStatus {
        self.statuses[self.index_of(pos)]
    }

    /// Blank cell indices in row-major order.
    pub fn blank_cells(&self) -> Vec<usize> {
        (0..self.cell_count())
            .filter(|&idx| self.statuses[idx] == CellStatus::Blank)
            .collect()
    }

    pub fn queen_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|&&s| s == CellStatus::Queen)
            .count()
    }

    /// All queens have been found. Only meaningful for a square board with
    /// one region per row.
    pub fn is_solved(&self) -> bool {
        self.queen_count() == self.height()
    }

    /// Value-semantic copy of the current statuses.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.width(), self.height(), self.statuses.clone())
    }

    /// Regions holding neither a Blank cell nor a Queen. Unreachable while
    /// every deduction is sound and the puzzle satisfiable; reachable when
    /// the rules prove the puzzle has no solution.
    pub fn stranded_regions(&self) -> Vec<&RegionId> {
        self.layout
            .regions
            .iter()
            .filter(|r| r.queen_count(self) == 0 && r.blank_cells(self).is_empty())
            .map(|r| r.id())
            .collect()
    }

    // ==================== Placement ====================

    /// The set of cells a hypothetical Queen at `idx` would render
    /// ineligible: the full row and column, the diagonally adjacent cells,
    /// and the rest of its region. The candidate itself is excluded.
    /// Diagonal adjacency is bounds-checked and never wraps; edge cells
    /// simply have fewer diagonal neighbours.
    pub fn would_block(&self, idx: usize) -> CellSet {
        let pos = self.position_of(idx);
        let mut blocked = CellSet::empty(self.cell_count());

        for cell in self.line_cells(Axis::Row, pos.y) {
            blocked.insert(cell);
        }
        for cell in self.line_cells(Axis::Col, pos.x) {
            blocked.insert(cell);
        }
        for dx in [-1isize, 1] {
            for dy in [-1isize, 1] {
                let (nx, ny) = (pos.x as isize + dx, pos.y as isize + dy);
                if nx >= 0 && ny >= 0 && (nx as usize) < self.width() && (ny as usize) < self.height()
                {
                    blocked.insert(self.index_of(Position::new(nx as usize, ny as usize)));
                }
            }
        }
        for &cell in self.region(self.region_index_of(idx)).cells() {
            blocked.insert(cell);
        }
        blocked.remove(idx);
        blocked
    }

    /// Commit a Queen at `idx`, then cross every Blank cell it blocks.
    pub fn place_queen(&mut self, idx: usize) {
        debug_assert_eq!(
            self.statuses[idx],
            CellStatus::Blank,
            "queen placed on a non-blank cell"
        );
        self.statuses[idx] = CellStatus::Queen;
        let blocked = self.would_block(idx);
        for cell in blocked.iter() {
            if self.statuses[cell] == CellStatus::Blank {
                self.statuses[cell] = CellStatus::Crossed;
            }
        }
    }

    /// Mark a Blank cell as proven ineligible. Crossing a Crossed cell is a
    /// no-op; crossing a Queen is a rule bug.
    pub(crate) fn cross(&mut self, idx: usize) {
        debug_assert_ne!(
            self.statuses[idx],
            CellStatus::Queen,
            "crossing a committed queen"
        );
        if self.statuses[idx] == CellStatus::Blank {
            self.statuses[idx] = CellStatus::Crossed;
        }
    }

    // ==================== Unique-candidate rule ====================

    /// One sweep of the unique-candidate rule: rows, then columns, then
    /// regions. Any unit with exactly one Blank member gets a Queen there
    /// immediately, so later units in the same sweep already see the
    /// consequences. Returns whether any Queen was placed; the solve loop
    /// re-invokes until this reaches a fixed point.
    pub fn apply_unique_candidates(&mut self) -> bool {
        let mut placed = false;

        let (width, height) = (self.width(), self.height());
        for y in 0..height {
            if let Some(idx) = self.sole_blank((0..width).map(|x| y * width + x)) {
                trace!(target: "solver", "row {} has a single blank cell", y);
                self.place_queen(idx);
                placed = true;
            }
        }
        for x in 0..width {
            if let Some(idx) = self.sole_blank((0..height).map(|y| y * width + x)) {
                trace!(target: "solver", "column {} has a single blank cell", x);
                self.place_queen(idx);
                placed = true;
            }
        }
        let layout = Arc::clone(&self.layout);
        for region in &layout.regions {
            if let Some(idx) = self.sole_blank(region.cells().iter().copied()) {
                trace!(target: "solver", "region {} has a single blank cell", region.id());
                self.place_queen(idx);
                placed = true;
            }
        }

        placed
    }

    /// The unit's single Blank member, if it has exactly one.
    fn sole_blank(&self, cells: impl Iterator<Item = usize>) -> Option<usize> {
        let mut found = None;
        for idx in cells {
            if self.statuses[idx] == CellStatus::Blank {
                if found.is_some() {
                    return None;
                }
                found = Some(idx);
            }
        }
        found
    }
}
