//! Solver-facing types: rules, loop states, configuration, reports.

use serde::{Deserialize, Serialize};

use crate::grid::Axis;
use crate::snapshot::Snapshot;

/// Inference rule behind a state-changing step, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// A row, column, or region had exactly one Blank cell left.
    UniqueCandidate,
    /// A Queen at the crossed cell would leave some region with no cell.
    RegionBlock,
    /// k regions confined to k rows (or columns) claim those lines entirely.
    AxisCover(Axis),
    /// Bounded hypothetical reasoning at the recorded depth.
    Lookahead(u32),
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UniqueCandidate => write!(f, "unique candidate"),
            Rule::RegionBlock => write!(f, "region block"),
            Rule::AxisCover(axis) => write!(f, "{} cover", axis),
            Rule::Lookahead(depth) => write!(f, "lookahead (depth {})", depth),
        }
    }
}

/// Solve-loop state machine. A run starts `Running` and ends in one of the
/// two terminal states. `Stuck` is a first-class outcome — the rules,
/// including bounded lookahead, have nothing left — never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveState {
    Running,
    Solved,
    Stuck,
}

impl SolveState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SolveState::Running)
    }
}

impl std::fmt::Display for SolveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveState::Running => write!(f, "running"),
            SolveState::Solved => write!(f, "solved"),
            SolveState::Stuck => write!(f, "stuck"),
        }
    }
}

/// Lookahead escalation bounds for the solve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Depth the prover starts at, and falls back to after any progress.
    pub min_lookahead: u32,
    /// Depth beyond which the loop gives up and reports `Stuck`.
    pub max_lookahead: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_lookahead: 2,
            max_lookahead: 20,
        }
    }
}

/// One state-changing step: the rule that fired and the board right after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveStep {
    pub rule: Rule,
    pub snapshot: Snapshot,
}

/// Result of running the solve loop to termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Terminal state: `Solved` or `Stuck`, never `Running`.
    pub state: SolveState,
    /// The board at termination.
    pub snapshot: Snapshot,
    /// Rounds executed, counting no-change rounds spent escalating depth.
    pub rounds: usize,
    /// One entry per state-changing step, in order; the feed external
    /// renderers consume.
    pub steps: Vec<SolveStep>,
}
