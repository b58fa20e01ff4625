use crate::entities::HydroKind;
use crate::solver::model::{Model, RowEntry, RowTag};
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

use super::BuildResult;

/// Submarket energy balance (§4.3.5): the equality whose dual is the PLD. Interconnection loss is
/// applied at the sending side - `Exp(m,t) = sum (1 - loss) * ic_flow` - per the §9 decision
/// record, so it is never double-counted against the receiving submarket.
pub struct SubmarketBalanceBuilder;

impl SubmarketBalanceBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet, enable_deficit: bool) -> BuildResult {
        const KIND: &str = "SubmarketEnergyBalance";
        let mut n_constraints = 0;
        let mut warnings = Vec::new();
        let t_count = vars.horizon_periods;

        for submarket in system.submarkets() {
            for t in 0..t_count {
                let mut entries = Vec::new();

                for plant in system.thermal_plants_in(&submarket.id) {
                    match vars.index_of(VariableFamily::ThermalGeneration, &plant.id, t) {
                        Some(g) => entries.push(RowEntry { col: g, coeff: 1.0 }),
                        None => warnings.push(format!("thermal plant '{}' has no generation variable; omitted from submarket balance", plant.id)),
                    }
                }

                for plant in system.hydro_plants_in(&submarket.id) {
                    match vars.index_of(VariableFamily::HydroGeneration, &plant.id, t) {
                        Some(gh) => entries.push(RowEntry { col: gh, coeff: 1.0 }),
                        None => warnings.push(format!("hydro plant '{}' has no generation variable; omitted from submarket balance", plant.id)),
                    }
                    if matches!(plant.kind, HydroKind::PumpedStorage { .. }) {
                        if let Some(pump) = vars.index_of(VariableFamily::Pumping, &plant.id, t) {
                            entries.push(RowEntry { col: pump, coeff: -1.0 });
                        }
                    }
                }

                for plant in system.renewable_plants_in(&submarket.id) {
                    match vars.index_of(VariableFamily::RenewableGeneration, &plant.id, t) {
                        Some(gr) => entries.push(RowEntry { col: gr, coeff: 1.0 }),
                        None => warnings.push(format!("renewable plant '{}' has no generation variable; omitted from submarket balance", plant.id)),
                    }
                }

                if enable_deficit {
                    if let Some(deficit) = vars.index_of(VariableFamily::Deficit, &submarket.id, t) {
                        entries.push(RowEntry { col: deficit, coeff: 1.0 });
                    }
                }

                for ic in system.interconnections_to(&submarket.id) {
                    match vars.index_of(VariableFamily::InterconnectionFlow, &ic.id, t) {
                        Some(flow) => entries.push(RowEntry { col: flow, coeff: 1.0 }),
                        None => warnings.push(format!("interconnection '{}' has no flow variable; omitted from submarket balance", ic.id)),
                    }
                }

                for ic in system.interconnections_from(&submarket.id) {
                    match vars.index_of(VariableFamily::InterconnectionFlow, &ic.id, t) {
                        Some(flow) => entries.push(RowEntry { col: flow, coeff: -(1.0 - ic.loss_fraction()) }),
                        None => warnings.push(format!("interconnection '{}' has no flow variable; omitted from submarket balance", ic.id)),
                    }
                }

                let demand: f64 = system.loads_in(&submarket.id).map(|l| l.demand_at(t)).sum();

                model.add_equality(
                    demand,
                    entries,
                    RowTag::SubmarketBalance {
                        submarket_id: submarket.id.clone(),
                        period: t,
                    },
                );
                n_constraints += 1;
            }
        }

        BuildResult::ok(KIND, n_constraints, warnings)
    }
}
