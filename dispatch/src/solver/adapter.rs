use highs::{HighsModelStatus, RowProblem, Sense};

use crate::config::{SolverOptions, SolverSelection};
use crate::system::System;
use crate::utils::logging::{start_timing, OperationCategory};
use crate::variables::VariableSet;

use super::cancellation::CancellationToken;
use super::model::{Model, RowTag};
use super::{SolverResult, SolverStatus};

/// Thread-hostile with respect to the underlying solver handle (§4.5): call from a single thread
/// per model. Batch parallelism (§11.3) runs one adapter per thread, never one shared across
/// threads.
pub struct SolverAdapter;

impl SolverAdapter {
    /// `warnings` carries whatever the constraint builders already accumulated (§7); it is
    /// threaded through unchanged on every return path so no builder warning is ever dropped
    /// on the floor, regardless of how the solve itself turns out.
    pub fn solve(model: &Model, system: &System, vars: &VariableSet, options: &SolverOptions, cancellation: &CancellationToken, warnings: Vec<String>) -> SolverResult {
        let _timing = start_timing("SolverAdapter::solve", OperationCategory::SolverInvocation);
        let has_integers = model.columns.iter().any(|c| c.is_integer);

        let milp_outcome = match Self::solve_once(model, options) {
            Ok(outcome) => outcome,
            Err(reason) => {
                return SolverResult {
                    status: SolverStatus::Error,
                    error: Some(reason),
                    warnings,
                    ..Default::default()
                }
            }
        };

        let status = translate_status(milp_outcome.status);
        if !matches!(status, SolverStatus::Optimal | SolverStatus::Feasible) {
            return SolverResult {
                status,
                solve_time_s: milp_outcome.solve_time_s,
                warnings,
                ..Default::default()
            };
        }

        let mut primal_columns = milp_outcome.columns.clone();
        let mut submarket_price = std::collections::HashMap::new();

        if has_integers && !cancellation.is_cancelled() {
            // Fix integer columns at their MILP solution and re-solve the LP relaxation purely
            // to recover meaningful duals on the submarket-balance equalities (§4.6, §9).
            let fixed_model = fix_integer_columns(model, &milp_outcome.columns);
            if let Ok(lp_outcome) = Self::solve_once(&fixed_model, options) {
                if matches!(translate_status(lp_outcome.status), SolverStatus::Optimal | SolverStatus::Feasible) {
                    primal_columns = lp_outcome.columns;
                    extract_submarket_prices(model, &lp_outcome.dual_rows, &mut submarket_price);
                }
            }
        } else if !has_integers {
            extract_submarket_prices(model, &milp_outcome.dual_rows, &mut submarket_price);
        }

        let primal = extract_primal(vars, &primal_columns);
        let _ = system;

        SolverResult {
            status,
            objective_value: milp_outcome.objective_value,
            objective_bound: milp_outcome.objective_bound,
            solve_time_s: milp_outcome.solve_time_s,
            node_count: None,
            primal,
            submarket_price,
            warnings,
            error: None,
        }
    }

    fn solve_once(model: &Model, options: &SolverOptions) -> Result<RawOutcome, String> {
        let start = std::time::Instant::now();
        let SolverSelection::Highs = options.solver;

        let mut problem = RowProblem::default();
        let columns: Vec<_> = model
            .columns
            .iter()
            .map(|col| {
                if col.is_integer {
                    problem.add_integer_column(col.objective_coeff, col.lower..=col.upper)
                } else {
                    problem.add_column(col.objective_coeff, col.lower..=col.upper)
                }
            })
            .collect();

        for row in &model.rows {
            let factors: Vec<_> = row.entries.iter().map(|e| (columns[e.col], e.coeff)).collect();
            problem.add_row(row.lower..=row.upper, factors);
        }

        let mut solved = problem.optimise(Sense::Minimise);
        solved.set_option("time_limit", options.time_limit_s);
        solved.set_option("mip_rel_gap", options.mip_gap);
        if !options.verbose {
            solved.set_option("output_flag", false);
        }
        let solved = solved.solve();

        let status = solved.status();
        let solution = solved.get_solution();

        Ok(RawOutcome {
            status,
            objective_value: solution.columns().iter().zip(model.columns.iter()).map(|(v, c)| v * c.objective_coeff).sum(),
            objective_bound: None,
            solve_time_s: start.elapsed().as_secs_f64(),
            columns: solution.columns().to_vec(),
            dual_rows: solution.dual_rows().to_vec(),
        })
    }
}

struct RawOutcome {
    status: HighsModelStatus,
    objective_value: f64,
    objective_bound: Option<f64>,
    solve_time_s: f64,
    columns: Vec<f64>,
    dual_rows: Vec<f64>,
}

fn translate_status(status: HighsModelStatus) -> SolverStatus {
    match status {
        HighsModelStatus::Optimal => SolverStatus::Optimal,
        HighsModelStatus::ReachedTimeLimit => SolverStatus::TimeLimit,
        HighsModelStatus::Infeasible => SolverStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => SolverStatus::Unbounded,
        _ => SolverStatus::Error,
    }
}

fn fix_integer_columns(model: &Model, solution: &[f64]) -> Model {
    let mut fixed = model.clone();
    for (col, value) in fixed.columns.iter_mut().zip(solution.iter()) {
        if col.is_integer {
            let rounded = value.round();
            col.lower = rounded;
            col.upper = rounded;
            col.is_integer = false;
        }
    }
    fixed
}

fn extract_submarket_prices(model: &Model, dual_rows: &[f64], out: &mut super::PriceMap) {
    for (row, dual) in model.rows.iter().zip(dual_rows.iter()) {
        if let RowTag::SubmarketBalance { submarket_id, period } = &row.tag {
            out.insert((submarket_id.clone(), *period), *dual);
        }
    }
}

fn extract_primal(vars: &VariableSet, columns: &[f64]) -> super::PrimalMap {
    let mut primal = std::collections::HashMap::new();
    for (global_index, value) in columns.iter().enumerate() {
        let (family, entity_id) = vars.label(global_index);
        let period = vars.spec(global_index).period;
        primal.insert((family, entity_id.clone(), period), *value);
    }
    primal
}
