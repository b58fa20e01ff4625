use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_MIP_GAP, DEFAULT_TIME_LIMIT_S};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverSelection {
    Highs,
}

impl Default for SolverSelection {
    fn default() -> Self {
        SolverSelection::Highs
    }
}

/// Timeouts, MIP gap, and solver selection passed to the adapter (§4.5). Owned by the caller,
/// never mutated by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    pub solver: SolverSelection,
    pub mip_gap: f64,
    pub time_limit_s: f64,
    pub threads: usize,
    pub verbose: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            solver: SolverSelection::default(),
            mip_gap: DEFAULT_MIP_GAP,
            time_limit_s: DEFAULT_TIME_LIMIT_S,
            threads: 1,
            verbose: false,
        }
    }
}
