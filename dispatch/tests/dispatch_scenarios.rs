//! End-to-end scenarios over the full builder pipeline (`batch::solve_system`). Each scenario is
//! sized so its optimum is forced by equalities or by one option strictly dominating another,
//! not by solver tie-breaking, so the asserted values are the unique optimum.

use chrono::NaiveDate;

use dessem_dispatch::batch::solve_system;
use dessem_dispatch::config::{ConstraintConfig, HydroBalanceConfig, SolverOptions};
use dessem_dispatch::data::TableInflowProvider;
use dessem_dispatch::entities::{
    FuelType, HydroKindTag, Id, Interconnection, Load, RenewableKind, RenewablePlant, Submarket, ThermalKind, ThermalPlant,
};
use dessem_dispatch::solver::model::Model;
use dessem_dispatch::solver::SolverStatus;
use dessem_dispatch::system::{System, SystemInput};
use dessem_dispatch::variables::{EnabledFamilies, VariableFamily, VariableManager};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn sm(code: &str) -> Submarket {
    Submarket::new(code, code, code, "BR").unwrap()
}

fn flat_load(id: &str, submarket: &str, mw: f64, periods: usize) -> Load {
    Load::new(id, id, None, Id::new("Submarket", submarket).unwrap(), mw, vec![1.0; periods]).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn thermal(
    id: &str,
    submarket: &str,
    capacity: f64,
    min_gen: f64,
    max_gen: f64,
    fuel_cost: f64,
) -> ThermalPlant {
    ThermalPlant::new(
        id,
        id,
        ThermalKind::Conventional,
        None,
        Id::new("Submarket", submarket).unwrap(),
        FuelType::NaturalGas,
        capacity,
        min_gen,
        max_gen,
        30.0,
        30.0,
        0,
        0,
        fuel_cost,
        None,
        0.0,
        0.0,
        false,
        false,
    )
    .unwrap()
}

fn assert_close(actual: f64, expected: f64, label: &str) {
    assert!((actual - expected).abs() < 1e-4, "{label}: expected {expected}, got {actual}");
}

/// S1: one thermal plant, flat demand of 50 MW over three hours. Deficit is enabled but
/// hopelessly uneconomic (penalty 10 000 Rs/MWh vs. 100 Rs/MWh fuel), so the balance equality
/// forces g[t] = 50 exactly and deficit[t] = 0 exactly; no alternate optimum exists.
#[test]
fn s1_single_thermal_flat_demand() {
    let input = SystemInput {
        submarkets: vec![sm("SE")],
        thermal_plants: vec![thermal("T1", "SE", 100.0, 20.0, 100.0, 100.0)],
        loads: vec![flat_load("L1", "SE", 50.0, 3)],
        ..Default::default()
    };
    let system = System::build(input, date(), 3, 1.0).unwrap();
    let inflow = TableInflowProvider::new();

    let result = solve_system(&system, &inflow, &ConstraintConfig::default(), &SolverOptions::default());
    assert_eq!(result.status, SolverStatus::Optimal);
    assert_close(result.objective_value, 15_000.0, "objective");

    let t1 = Id::new("ThermalPlant", "T1").unwrap();
    let se = Id::new("Submarket", "SE").unwrap();
    for t in 0..3 {
        assert_close(result.primal[&(VariableFamily::ThermalGeneration, t1.clone(), t)], 50.0, "g");
        assert_close(result.primal[&(VariableFamily::ThermalCommitment, t1.clone(), t)], 1.0, "u");
        assert_close(result.primal[&(VariableFamily::Deficit, se.clone(), t)], 0.0, "deficit");
    }
    // Period 0 starts from initial_commitment = false and ends committed, so it must start up.
    assert_close(result.primal[&(VariableFamily::ThermalStartup, t1.clone(), 0)], 1.0, "v0");
    assert_close(result.primal[&(VariableFamily::ThermalShutdown, t1, 0)], 0.0, "w0");
}

/// Regression: a plant that starts already committed (`initial_commitment = true`) and whose
/// output is forced positive by demand (deficit disabled, sole supplier) must satisfy the t=0
/// state-transition equation with no startup and no shutdown. A sign-flipped RHS makes this
/// infeasible instead, since `u=1` (forced by positive generation) would then require `w − v = −2`,
/// which no 0/1 pair can satisfy.
#[test]
fn initially_committed_plant_needs_no_startup_at_t0() {
    let mut plant = thermal("T1", "SE", 100.0, 0.0, 100.0, 100.0);
    plant.initial_commitment = true;
    let input = SystemInput {
        submarkets: vec![sm("SE")],
        thermal_plants: vec![plant],
        loads: vec![flat_load("L1", "SE", 50.0, 2)],
        ..Default::default()
    };
    let system = System::build(input, date(), 2, 1.0).unwrap();
    let inflow = TableInflowProvider::new();

    let config = ConstraintConfig {
        enable_deficit: false,
        ..ConstraintConfig::default()
    };
    let result = solve_system(&system, &inflow, &config, &SolverOptions::default());
    assert_eq!(result.status, SolverStatus::Optimal);

    let t1 = Id::new("ThermalPlant", "T1").unwrap();
    assert_close(result.primal[&(VariableFamily::ThermalCommitment, t1.clone(), 0)], 1.0, "u0");
    assert_close(result.primal[&(VariableFamily::ThermalStartup, t1.clone(), 0)], 0.0, "v0");
    assert_close(result.primal[&(VariableFamily::ThermalShutdown, t1, 0)], 0.0, "w0");
}

/// S2: two thermals competing for one submarket's demand. A is strictly cheaper than B and
/// capacity-limited at 40 MW; B is uncapped in practice. Merit order forces A to its ceiling and
/// B to cover the residual, and the submarket-balance dual (the PLD) settles at B's marginal
/// cost since B is the one with headroom.
#[test]
fn s2_merit_order_sets_pld_at_marginal_unit() {
    let input = SystemInput {
        submarkets: vec![sm("SE")],
        thermal_plants: vec![thermal("A", "SE", 40.0, 0.0, 40.0, 50.0), thermal("B", "SE", 1000.0, 0.0, 1000.0, 100.0)],
        loads: vec![flat_load("L1", "SE", 60.0, 1)],
        ..Default::default()
    };
    let system = System::build(input, date(), 1, 1.0).unwrap();
    let inflow = TableInflowProvider::new();

    let result = solve_system(&system, &inflow, &ConstraintConfig::default(), &SolverOptions::default());
    assert_eq!(result.status, SolverStatus::Optimal);
    assert_close(result.objective_value, 4_000.0, "objective");

    let a = Id::new("ThermalPlant", "A").unwrap();
    let b = Id::new("ThermalPlant", "B").unwrap();
    let se = Id::new("Submarket", "SE").unwrap();
    assert_close(result.primal[&(VariableFamily::ThermalGeneration, a, 0)], 40.0, "g_A");
    assert_close(result.primal[&(VariableFamily::ThermalGeneration, b, 0)], 20.0, "g_B");
    assert_close(result.submarket_price[&(se, 0)], 100.0, "PLD");
}

/// S3: a two-reservoir cascade with a one-period travel delay. Checks that the upstream release
/// term that the water-balance builder threads into the downstream reservoir's equation one
/// period later carries the documented `alpha = hm3 per m3/s-hour` conversion factor, regardless
/// of which side of the equation it lands on.
#[test]
fn s3_cascade_coefficient_matches_alpha() {
    let upstream = dessem_dispatch::entities::HydroPlant::new(
        "U",
        "Upstream",
        HydroKindTag::Reservoir,
        None,
        None,
        Id::new("Submarket", "SE").unwrap(),
        1000.0,
        100.0,
        500.0,
        300.0,
        0.0,
        200.0,
        0.0,
        0.9,
        10.0,
        Some(Id::new("HydroPlant", "D").unwrap()),
        Some(1.0),
    )
    .unwrap();
    let downstream = dessem_dispatch::entities::HydroPlant::new(
        "D",
        "Downstream",
        HydroKindTag::Reservoir,
        None,
        None,
        Id::new("Submarket", "SE").unwrap(),
        1000.0,
        100.0,
        500.0,
        300.0,
        0.0,
        200.0,
        0.0,
        0.9,
        10.0,
        None,
        None,
    )
    .unwrap();

    let input = SystemInput {
        submarkets: vec![sm("SE")],
        hydro_plants: vec![upstream, downstream],
        ..Default::default()
    };
    let system = System::build(input, date(), 2, 1.0).unwrap();
    let enabled = EnabledFamilies { thermal: false, ..EnabledFamilies::default() };
    let vars = VariableManager::create_variables(&system, enabled);
    let mut model = Model::from_variable_set(&vars);
    let inflow = TableInflowProvider::new();

    dessem_dispatch::constraints::hydro_balance::HydroBalanceBuilder::build(&mut model, &system, &vars, &HydroBalanceConfig::default(), &inflow);

    let u_id = Id::new("HydroPlant", "U").unwrap();
    let d_id = Id::new("HydroPlant", "D").unwrap();
    let q_u_t0 = vars.index_of(VariableFamily::TurbineOutflow, &u_id, 0).unwrap();
    let s_d_t1 = vars.index_of(VariableFamily::ReservoirStorage, &d_id, 1).unwrap();

    let row = model
        .rows
        .iter()
        .find(|row| row.entries.iter().any(|e| e.col == s_d_t1) && row.entries.iter().any(|e| e.col == q_u_t0))
        .expect("downstream water-balance row at t=1 referencing the upstream release at t=0 must exist");
    let entry = row.entries.iter().find(|e| e.col == q_u_t0).unwrap();
    assert_close(entry.coeff.abs(), 0.0036, "cascade coefficient");
}

/// S4: one curtailable wind plant, demand well below its forecast. The balance equality pins
/// generation at demand, and the envelope equality (gr + curtail = forecast) then forces the
/// residual onto curtailment; minimizing the curtailment penalty only pushes generation to its
/// balance-imposed ceiling, it cannot go further.
#[test]
fn s4_forced_curtailment() {
    let wind = RenewablePlant::new(
        "W1",
        "Wind Farm",
        RenewableKind::Wind,
        None,
        Id::new("Submarket", "NE").unwrap(),
        100.0,
        vec![100.0],
        true,
        0.0,
        100.0,
        60.0,
        60.0,
        false,
    )
    .unwrap();
    let input = SystemInput {
        submarkets: vec![sm("NE")],
        renewable_plants: vec![wind],
        loads: vec![flat_load("L1", "NE", 30.0, 1)],
        ..Default::default()
    };
    let system = System::build(input, date(), 1, 1.0).unwrap();
    let inflow = TableInflowProvider::new();

    let result = solve_system(&system, &inflow, &ConstraintConfig::default(), &SolverOptions::default());
    assert_eq!(result.status, SolverStatus::Optimal);

    let w1 = Id::new("RenewablePlant", "W1").unwrap();
    assert_close(result.primal[&(VariableFamily::RenewableGeneration, w1.clone(), 0)], 30.0, "gr");
    assert_close(result.primal[&(VariableFamily::Curtailment, w1, 0)], 70.0, "curtail");
}

/// S5: two submarkets joined by one lossy interconnection. Loss is booked at the sending side
/// (§9), so the receiving submarket's balance fixes the flow at its demand exactly, and the
/// sending submarket's balance then fixes its own generation at `(1 - loss) * flow`. Both values
/// are forced by equalities alone.
#[test]
fn s5_interconnection_with_loss() {
    let ic = Interconnection::new("IC1", Id::new("Submarket", "A").unwrap(), Id::new("Submarket", "B").unwrap(), 1000.0, 10.0).unwrap();
    let input = SystemInput {
        submarkets: vec![sm("A"), sm("B")],
        thermal_plants: vec![thermal("GA", "A", 1000.0, 0.0, 1000.0, 100.0)],
        loads: vec![flat_load("LB", "B", 90.0, 1)],
        interconnections: vec![ic],
        ..Default::default()
    };
    let system = System::build(input, date(), 1, 1.0).unwrap();
    let inflow = TableInflowProvider::new();

    let result = solve_system(&system, &inflow, &ConstraintConfig::default(), &SolverOptions::default());
    assert_eq!(result.status, SolverStatus::Optimal);
    assert_close(result.objective_value, 8_100.0, "objective");

    let ga = Id::new("ThermalPlant", "GA").unwrap();
    let ic1 = Id::new("Interconnection", "IC1").unwrap();
    assert_close(result.primal[&(VariableFamily::ThermalGeneration, ga, 0)], 81.0, "g_A");
    assert_close(result.primal[&(VariableFamily::InterconnectionFlow, ic1, 0)], 90.0, "ic_flow");
}

/// S6: demand vastly exceeds the only plant's capacity and deficit is disabled, so no feasible
/// assignment of the balance equality exists.
#[test]
fn s6_infeasible_without_deficit() {
    let input = SystemInput {
        submarkets: vec![sm("SE")],
        thermal_plants: vec![thermal("T1", "SE", 10.0, 0.0, 10.0, 1.0)],
        loads: vec![flat_load("L1", "SE", 100.0, 1)],
        ..Default::default()
    };
    let system = System::build(input, date(), 1, 1.0).unwrap();
    let inflow = TableInflowProvider::new();

    let config = ConstraintConfig {
        enable_deficit: false,
        ..ConstraintConfig::default()
    };
    let result = solve_system(&system, &inflow, &config, &SolverOptions::default());
    assert_eq!(result.status, SolverStatus::Infeasible);
}
