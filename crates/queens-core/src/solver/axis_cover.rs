//! Region/axis common-holdings closure.
//!
//! Hall-style cover test: if k regions' remaining Blank cells are confined
//! to k rows (or columns) which they collectively fill, those lines belong
//! to them, and every other region's Blank cells on them can be crossed.
//! Subset nesting among holdings is accepted, which also covers the plain
//! identical-holdings grouping and catches cascading closures in one pass.

use log::trace;

use crate::grid::{Axis, CellStatus, Grid};
use crate::region::Holdings;

/// One pass over one axis. Holdings are computed once against the
/// pass-entry state; crossings check live statuses, so a cell is never
/// crossed twice. Returns whether anything was crossed.
pub fn apply(grid: &mut Grid, axis: Axis) -> bool {
    let holdings: Vec<Holdings> = grid
        .regions()
        .iter()
        .map(|region| region.holdings(grid, axis))
        .collect();

    let mut changed = false;
    for (r, &mine) in holdings.iter().enumerate() {
        if mine.is_empty() {
            continue;
        }

        // This region plus every other whose non-empty holdings nest
        // inside ours. Empty holdings are excluded: a region with no
        // blanks on this axis is vacuously a subset but claims nothing.
        let confined: Vec<usize> = holdings
            .iter()
            .enumerate()
            .filter(|&(other, h)| other == r || (!h.is_empty() && h.is_subset(mine)))
            .map(|(other, _)| other)
            .collect();
        if confined.len() != mine.len() {
            continue;
        }

        for line in mine.iter() {
            for idx in grid.line_cells(axis, line) {
                if grid.status(idx) == CellStatus::Blank
                    && !confined.contains(&grid.region_index_of(idx))
                {
                    trace!(
                        target: "solver",
                        "{} {} claimed by cover: crossing {}",
                        axis,
                        line,
                        grid.position_of(idx)
                    );
                    grid.cross(idx);
                    changed = true;
                }
            }
        }
    }
    changed
}
