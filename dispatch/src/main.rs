//! Reference binary (§12): wires `Args -> fixtures::load_system -> VariableManager ->
//! {builders, objective} -> SolverAdapter -> SolverResult -> CSV/JSON summary`. A consumer of
//! `lib.rs` through its public contract only, never the other way around.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use dessem_dispatch::batch::{run_batch, solve_system, BatchInstance};
use dessem_dispatch::config::{Args, ConstraintConfig, HydroBalanceConfig, SolverOptions};
use dessem_dispatch::data::load_system;
use dessem_dispatch::solver::SolverResult;
use dessem_dispatch::utils::logging::{init_logging, print_timing_report};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.enable_timing());

    let outcome = run(&args);

    if args.enable_timing() {
        print_timing_report();
    }

    match outcome {
        Ok(all_optimal) if all_optimal => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(true)` when every solved instance reached an optimal solution. Load/IO failures
/// are `anyhow` orchestration errors (§10.2); solver non-optimality is a result field, not an
/// error, so it is reported through the return value rather than `Err`.
fn run(args: &Args) -> Result<bool> {
    let config = ConstraintConfig {
        enable_deficit: !args.no_deficit(),
        hydro_balance: HydroBalanceConfig { include_spill: !args.no_spill(), ..HydroBalanceConfig::default() },
        ..ConstraintConfig::default()
    };
    let options = SolverOptions {
        mip_gap: args.mip_gap(),
        time_limit_s: args.time_limit_s(),
        ..SolverOptions::default()
    };

    let base_date = Local::now().date_naive();
    let root = Path::new(args.data_dir());

    let results = if args.batch() {
        run_as_batch(root, base_date, args, &config, &options)?
    } else {
        vec![run_single(root, base_date, args, &config, &options)?]
    };

    report(&results, args.json())?;
    Ok(results.iter().all(SolverResult::is_optimal))
}

fn run_single(dir: &Path, base_date: chrono::NaiveDate, args: &Args, config: &ConstraintConfig, options: &SolverOptions) -> Result<SolverResult> {
    let (system, inflow) = load_system(dir, base_date, args.horizon_periods(), args.period_duration_hours())
        .with_context(|| format!("failed to load fixtures from {}", dir.display()))?;
    Ok(solve_system(&system, &inflow, config, options))
}

fn run_as_batch(root: &Path, base_date: chrono::NaiveDate, args: &Args, config: &ConstraintConfig, options: &SolverOptions) -> Result<Vec<SolverResult>> {
    let mut entries: Vec<_> = std::fs::read_dir(root)
        .with_context(|| format!("failed to list scenario directories under {}", root.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    entries.sort();

    let mut loaded = Vec::new();
    for dir in &entries {
        let pair = load_system(dir, base_date, args.horizon_periods(), args.period_duration_hours())
            .with_context(|| format!("failed to load fixtures from {}", dir.display()))?;
        loaded.push(pair);
    }

    let instances: Vec<_> = loaded.iter().map(|(system, inflow)| BatchInstance { system, inflow }).collect();
    Ok(run_batch(&instances, config, options))
}

fn report(results: &[SolverResult], as_json: bool) -> Result<()> {
    if as_json {
        let json = serde_json::to_string_pretty(&summaries(results)).context("failed to serialize results as JSON")?;
        println!("{json}");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("--- instance {i}: status={:?} objective={:.2} solve_time_s={:.3}", result.status, result.objective_value, result.solve_time_s);
        let mut prices: Vec<_> = result.submarket_price.iter().collect();
        prices.sort_by(|a, b| a.0.cmp(b.0));
        for ((submarket_id, period), pld) in prices {
            println!("  PLD[{submarket_id}, t={period}] = {pld:.4}");
        }
        for warning in &result.warnings {
            println!("  warning: {warning}");
        }
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct ResultSummary {
    status: String,
    objective_value: f64,
    solve_time_s: f64,
    submarket_price: Vec<(String, usize, f64)>,
    warnings: Vec<String>,
}

fn summaries(results: &[SolverResult]) -> Vec<ResultSummary> {
    results
        .iter()
        .map(|r| {
            let mut submarket_price: Vec<_> = r.submarket_price.iter().map(|((id, t), v)| (id.to_string(), *t, *v)).collect();
            submarket_price.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
            ResultSummary {
                status: format!("{:?}", r.status),
                objective_value: r.objective_value,
                solve_time_s: r.solve_time_s,
                submarket_price,
                warnings: r.warnings.clone(),
            }
        })
        .collect()
}
