use crate::config::RenewableConfig;
use crate::solver::model::{Model, RowEntry, RowTag};
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

use super::BuildResult;

/// Renewable envelope (§4.3.4): `gr + curtail = forecast` when curtailment is allowed, else
/// `gr <= forecast` and `curtail` pinned to zero.
pub struct RenewableEnvelopeBuilder;

impl RenewableEnvelopeBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet, _config: &RenewableConfig) -> BuildResult {
        const KIND: &str = "RenewableEnvelope";
        let mut n_constraints = 0;
        let t_count = vars.horizon_periods;

        for plant in system.renewable_plants() {
            for t in 0..t_count {
                let gr = vars.index_of(VariableFamily::RenewableGeneration, &plant.id, t).unwrap();
                let curtail = vars.index_of(VariableFamily::Curtailment, &plant.id, t).unwrap();
                let forecast = plant.forecast_at(t);

                if plant.curtailment_allowed {
                    model.add_equality(forecast, vec![RowEntry { col: gr, coeff: 1.0 }, RowEntry { col: curtail, coeff: 1.0 }], RowTag::Other("renewable_envelope_with_curtailment"));
                } else {
                    model.add_upper_bound(forecast, vec![RowEntry { col: gr, coeff: 1.0 }], RowTag::Other("renewable_envelope_no_curtailment"));
                    n_constraints += 1;
                    model.add_equality(0.0, vec![RowEntry { col: curtail, coeff: 1.0 }], RowTag::Other("renewable_curtailment_pinned_zero"));
                }
                n_constraints += 1;
            }
        }

        BuildResult::ok(KIND, n_constraints, Vec::new())
    }
}
