//! Production-cost objective (§4.4): fuel cost (optionally overridden per period), startup and
//! shutdown cost, water value carried on storage, and optional curtailment/deficit penalties.

use crate::config::ConstraintConfig;
use crate::solver::model::Model;
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

/// Per-component aggregate coefficients recorded for later cost accounting, as named by §4.4's
/// "the builder records per-component aggregate coefficients for later accounting."
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectiveBreakdown {
    pub fuel_cost_terms: usize,
    pub startup_cost_terms: usize,
    pub shutdown_cost_terms: usize,
    pub water_value_terms: usize,
    pub curtailment_penalty_terms: usize,
    pub deficit_penalty_terms: usize,
}

pub struct ObjectiveBuilder;

impl ObjectiveBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet, config: &ConstraintConfig) -> ObjectiveBreakdown {
        let mut breakdown = ObjectiveBreakdown::default();
        let t_count = vars.horizon_periods;

        for plant in system.thermal_plants() {
            for t in 0..t_count {
                let g = vars.index_of(VariableFamily::ThermalGeneration, &plant.id, t).unwrap();
                model.set_objective_coeff(g, plant.fuel_cost_at(t));
                breakdown.fuel_cost_terms += 1;

                let v = vars.index_of(VariableFamily::ThermalStartup, &plant.id, t).unwrap();
                model.set_objective_coeff(v, plant.startup_cost_rs);
                breakdown.startup_cost_terms += 1;

                let w = vars.index_of(VariableFamily::ThermalShutdown, &plant.id, t).unwrap();
                model.set_objective_coeff(w, plant.shutdown_cost_rs);
                breakdown.shutdown_cost_terms += 1;
            }
        }

        for plant in system.hydro_plants() {
            for t in 0..t_count {
                if let Some(s) = vars.index_of(VariableFamily::ReservoirStorage, &plant.id, t) {
                    model.set_objective_coeff(s, plant.water_value_rs_per_hm3);
                    breakdown.water_value_terms += 1;
                }
            }
        }

        if config.enable_renewable_envelope {
            for plant in system.renewable_plants() {
                for t in 0..t_count {
                    let curtail = vars.index_of(VariableFamily::Curtailment, &plant.id, t).unwrap();
                    model.set_objective_coeff(curtail, config.curtailment_penalty_rs_per_mwh);
                    breakdown.curtailment_penalty_terms += 1;
                }
            }
        }

        if config.enable_deficit {
            for submarket in system.submarkets() {
                for t in 0..t_count {
                    if let Some(deficit) = vars.index_of(VariableFamily::Deficit, &submarket.id, t) {
                        model.set_objective_coeff(deficit, config.deficit_penalty_rs_per_mwh);
                        breakdown.deficit_penalty_terms += 1;
                    }
                }
            }
        }

        breakdown
    }
}
