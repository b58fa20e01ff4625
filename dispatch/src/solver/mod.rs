//! Solver adapter (§4.5) and solution extraction (§4.6): hands the assembled `Model` to HiGHS,
//! then (for MILPs) fixes integer variables and re-solves the LP relaxation to recover meaningful
//! duals on the submarket-balance constraints.

pub mod adapter;
pub mod cancellation;
pub mod error;
pub mod model;

pub use adapter::SolverAdapter;
pub use cancellation::CancellationToken;
pub use error::{BuilderFailure, SolverError};
pub use model::{Column, Model, Row, RowEntry, RowTag};

use std::collections::HashMap;

use crate::entities::Id;
use crate::variables::VariableFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    TimeLimit,
    Error,
}

impl Default for SolverStatus {
    fn default() -> Self {
        SolverStatus::Error
    }
}

/// Primal variable values keyed the way §4.5/§4.6 name them: `(family, entity_id, t) -> value`.
pub type PrimalMap = HashMap<(VariableFamily, Id, usize), f64>;

/// PLD: dual value of the submarket-balance equality, keyed `(submarket_id, period) -> value`.
pub type PriceMap = HashMap<(Id, usize), f64>;

#[derive(Debug, Clone, Default)]
pub struct SolverResult {
    pub status: SolverStatus,
    pub objective_value: f64,
    pub objective_bound: Option<f64>,
    pub solve_time_s: f64,
    pub node_count: Option<u64>,
    pub primal: PrimalMap,
    pub submarket_price: PriceMap,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl SolverResult {
    pub fn is_optimal(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal)
    }
}
