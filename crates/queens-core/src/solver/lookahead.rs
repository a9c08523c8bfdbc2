//! Bounded recursive consistency probe.
//!
//! Answers, for a candidate cell and a depth `n`: would a Queen here,
//! followed by up to `n - 1` further levels of hypothetical placement,
//! necessarily strand some region? Exponential in the remaining blanks and
//! in `n`; the solve loop keeps `n` small and only reaches for this when
//! the direct rules stall.

use log::trace;

use crate::grid::Grid;

use super::elimination;

/// Recursive probe. Depth 1 is the direct elimination test and needs no
/// copy. Deeper probes fork the board (statuses only — the layout is
/// shared), commit the hypothetical Queen on the fork, and re-ask at
/// `depth - 1` for every Blank cell left. Any positive probe condemns the
/// candidate. The live grid is never touched.
pub fn queen_would_strand(grid: &Grid, idx: usize, depth: u32) -> bool {
    if depth <= 1 {
        return elimination::queen_would_block_region(grid, idx);
    }
    if elimination::queen_would_block_region(grid, idx) {
        return true;
    }

    let mut fork = grid.clone();
    fork.place_queen(idx);
    fork.blank_cells()
        .into_iter()
        .any(|next| queen_would_strand(&fork, next, depth - 1))
}

/// Cross the first Blank cell (row-major order) proven unsafe at `depth`.
/// At most one cell per invocation: independent hypotheses must not
/// compound within a single round.
pub fn cross_first_unsafe(grid: &mut Grid, depth: u32) -> Option<usize> {
    let condemned = grid
        .blank_cells()
        .into_iter()
        .find(|&idx| queen_would_strand(grid, idx, depth))?;
    trace!(
        target: "solver",
        "lookahead depth {}: crossing {}",
        depth,
        grid.position_of(condemned)
    );
    grid.cross(condemned);
    Some(condemned)
}
