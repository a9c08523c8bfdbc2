//! The "would block a region" elimination rule.
//!
//! A Blank cell whose hypothetical Queen would swallow every remaining
//! Blank cell of some other region can never legally hold a Queen itself.

use log::trace;

use crate::cellset::CellSet;
use crate::grid::Grid;

/// Would a Queen at `idx` leave some *other* region with no Blank cell?
/// Regions that already have no Blank cells are ignored.
pub fn queen_would_block_region(grid: &Grid, idx: usize) -> bool {
    let blocked = grid.would_block(idx);
    let own = grid.region_index_of(idx);
    grid.regions().iter().enumerate().any(|(r, region)| {
        if r == own {
            return false;
        }
        let blanks = region.blank_cells(grid);
        !blanks.is_empty() && blanks.is_subset(&blocked)
    })
}

/// All Blank cells condemned by the rule, scanned against the pre-pass
/// state. Callers commit the crossings afterwards; nothing the scan reads
/// is mutated mid-pass.
pub fn condemned_cells(grid: &Grid) -> Vec<usize> {
    let region_blanks: Vec<CellSet> = grid
        .regions()
        .iter()
        .map(|region| region.blank_cells(grid))
        .collect();

    grid.blank_cells()
        .into_iter()
        .filter(|&idx| {
            let blocked = grid.would_block(idx);
            let own = grid.region_index_of(idx);
            region_blanks
                .iter()
                .enumerate()
                .any(|(r, blanks)| r != own && !blanks.is_empty() && blanks.is_subset(&blocked))
        })
        .collect()
}

/// One full pass: scan, then commit. Returns whether anything was crossed.
pub fn apply(grid: &mut Grid) -> bool {
    let condemned = condemned_cells(grid);
    for &idx in &condemned {
        trace!(target: "solver", "region block: crossing {}", grid.position_of(idx));
        grid.cross(idx);
    }
    !condemned.is_empty()
}
