use crate::solver::model::{Model, RowEntry, RowTag};
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

use super::BuildResult;

/// Interconnection flow envelope (§4.3.6): `-capacity <= ic_flow <= +capacity`. The bound is
/// already set at variable-creation time; this builder exists so the envelope is an explicit,
/// independently-orderable constraint the way the spec names it, and so a future asymmetric-limit
/// extension has a single place to land.
pub struct InterconnectionEnvelopeBuilder;

impl InterconnectionEnvelopeBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet) -> BuildResult {
        const KIND: &str = "InterconnectionEnvelope";
        let mut n_constraints = 0;
        let t_count = vars.horizon_periods;

        for ic in system.interconnections() {
            for t in 0..t_count {
                let flow = vars.index_of(VariableFamily::InterconnectionFlow, &ic.id, t).unwrap();
                model.add_row(-ic.capacity_mw, ic.capacity_mw, vec![RowEntry { col: flow, coeff: 1.0 }], RowTag::Other("interconnection_envelope"));
                n_constraints += 1;
            }
        }

        BuildResult::ok(KIND, n_constraints, Vec::new())
    }
}
