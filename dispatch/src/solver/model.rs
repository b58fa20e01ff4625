//! A solver-agnostic intermediate model (§9 "Variables as indices, not objects"; §4.5). Builders
//! append rows against global variable indices from the `VariableSet`; the adapter alone
//! translates this into the concrete `highs` problem.

use crate::entities::Id;
use crate::variables::VariableSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub lower: f64,
    pub upper: f64,
    pub is_integer: bool,
    pub objective_coeff: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowEntry {
    pub col: usize,
    pub coeff: f64,
}

/// Tags a row so the extractor can find it again after the solve. Only `SubmarketBalance` rows
/// carry duals of interest (§4.6), but every row is tagged for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum RowTag {
    SubmarketBalance { submarket_id: Id, period: usize },
    Other(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub lower: f64,
    pub upper: f64,
    pub entries: Vec<RowEntry>,
    pub tag: RowTag,
}

/// Accumulates columns (one per decision variable) and rows (one per constraint) before a single
/// hand-off to the solver adapter. Columns are seeded 1:1 from `VariableSet::specs` so column
/// index == global variable index throughout.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Model {
    pub fn with_columns(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Seeds one column per materialized variable, 1:1 with `VariableSet::specs` so column index
    /// equals global variable index throughout the rest of the build (§9).
    pub fn from_variable_set(vars: &VariableSet) -> Self {
        let columns = vars
            .specs
            .iter()
            .map(|spec| Column {
                lower: spec.lower,
                upper: spec.upper,
                is_integer: spec.is_integer,
                objective_coeff: 0.0,
            })
            .collect();
        Self::with_columns(columns)
    }

    pub fn add_row(&mut self, lower: f64, upper: f64, entries: Vec<RowEntry>, tag: RowTag) -> usize {
        let index = self.rows.len();
        self.rows.push(Row { lower, upper, entries, tag });
        index
    }

    pub fn add_equality(&mut self, value: f64, entries: Vec<RowEntry>, tag: RowTag) -> usize {
        self.add_row(value, value, entries, tag)
    }

    pub fn add_upper_bound(&mut self, upper: f64, entries: Vec<RowEntry>, tag: RowTag) -> usize {
        self.add_row(f64::NEG_INFINITY, upper, entries, tag)
    }

    pub fn add_lower_bound(&mut self, lower: f64, entries: Vec<RowEntry>, tag: RowTag) -> usize {
        self.add_row(lower, f64::INFINITY, entries, tag)
    }

    pub fn set_objective_coeff(&mut self, col: usize, coeff: f64) {
        self.columns[col].objective_coeff += coeff;
    }
}
