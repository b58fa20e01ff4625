use crate::solver::model::{Model, RowEntry, RowTag};
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

use super::BuildResult;

/// Linear hydro production function `gh[j,t] = rho_j * q[j,t]` (§4.3.3). Bounds on `gh` and `q`
/// were already set at variable-creation time; this builder only emits the linking equality.
pub struct HydroProductionBuilder;

impl HydroProductionBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet) -> BuildResult {
        const KIND: &str = "HydroProductionFunction";
        let mut warnings = Vec::new();
        let mut n_constraints = 0;
        let t_count = vars.horizon_periods;

        for plant in system.hydro_plants() {
            let Some(rho) = plant.production_coefficient() else {
                warnings.push(format!("hydro plant '{}' has max_outflow_m3s = 0; skipping production function", plant.id));
                continue;
            };
            for t in 0..t_count {
                let gh = vars.index_of(VariableFamily::HydroGeneration, &plant.id, t).unwrap();
                let q = vars.index_of(VariableFamily::TurbineOutflow, &plant.id, t).unwrap();
                model.add_equality(0.0, vec![RowEntry { col: gh, coeff: 1.0 }, RowEntry { col: q, coeff: -rho }], RowTag::Other("hydro_production_function"));
                n_constraints += 1;
            }
        }

        BuildResult::ok(KIND, n_constraints, warnings)
    }
}
