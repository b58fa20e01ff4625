use crate::config::{constants::ALPHA_HM3_PER_M3S_HOUR, HydroBalanceConfig};
use crate::data::inflow::InflowProvider;
use crate::entities::HydroKind;
use crate::solver::model::{Model, RowEntry, RowTag};
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

use super::BuildResult;

/// Hydro water balance (§4.3.2): reservoir storage recursion with cascade inflow from upstream
/// releases (gated by `include_spill`), run-of-river outflow-bounded-by-inflow, and
/// pumped-storage's extra recharge term.
pub struct HydroBalanceBuilder;

impl HydroBalanceBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet, config: &HydroBalanceConfig, inflow: &dyn InflowProvider) -> BuildResult {
        const KIND: &str = "HydroWaterBalance";
        let mut warnings = Vec::new();
        let mut n_constraints = 0;
        let t_count = vars.horizon_periods;
        let alpha = ALPHA_HM3_PER_M3S_HOUR * system.period_duration_hours;
        let cascade = system.cascade();

        let plants: Vec<_> = system.hydro_plants().collect();
        for (index, plant) in plants.iter().enumerate() {
            let q_of = |t: usize| vars.index_of(VariableFamily::TurbineOutflow, &plant.id, t).unwrap();
            let spill_of = |t: usize| vars.index_of(VariableFamily::Spillage, &plant.id, t);

            if !config.include_spill {
                if spill_of(0).is_some() {
                    for t in 0..t_count {
                        let spill = spill_of(t).expect("spillage is materialized for every period once it exists for period 0");
                        model.add_equality(0.0, vec![RowEntry { col: spill, coeff: 1.0 }], RowTag::Other("hydro_spill_pin"));
                        n_constraints += 1;
                    }
                }
            }

            match plant.kind {
                HydroKind::RunOfRiver => {
                    for t in 0..t_count {
                        let inflow_value = match inflow.hourly_m3s(&plant.id, t) {
                            Some(v) => v,
                            None => {
                                warnings.push(format!("no inflow data for run-of-river plant '{}' at period {t}; defaulting to 0", plant.id));
                                0.0
                            }
                        };
                        model.add_upper_bound(inflow_value, vec![RowEntry { col: q_of(t), coeff: 1.0 }], RowTag::Other("hydro_run_of_river_inflow"));
                        n_constraints += 1;
                    }
                }
                HydroKind::Reservoir | HydroKind::PumpedStorage { .. } => {
                    let s_of = |t: usize| vars.index_of(VariableFamily::ReservoirStorage, &plant.id, t).unwrap();
                    let pump_of = |t: usize| vars.index_of(VariableFamily::Pumping, &plant.id, t);

                    for t in 0..t_count {
                        let s_t = s_of(t);

                        if t == 0 {
                            // Period 1 fixes storage at the plant's initial volume (§4.3.2); no
                            // inflow/outflow/spill/cascade terms enter this first equation.
                            model.add_equality(plant.initial_volume_hm3, vec![RowEntry { col: s_t, coeff: 1.0 }], RowTag::Other("hydro_water_balance_initial"));
                            n_constraints += 1;
                        } else {
                            let mut entries = vec![RowEntry { col: s_t, coeff: 1.0 }, RowEntry { col: s_of(t - 1), coeff: -1.0 }];

                            let inflow_value = match inflow.hourly_m3s(&plant.id, t) {
                                Some(v) => v,
                                None => {
                                    warnings.push(format!("no inflow data for hydro plant '{}' at period {t}; defaulting to 0", plant.id));
                                    0.0
                                }
                            };
                            let rhs = inflow_value * alpha;

                            entries.push(RowEntry { col: q_of(t), coeff: alpha });
                            if let Some(spill) = spill_of(t) {
                                entries.push(RowEntry { col: spill, coeff: alpha });
                            }

                            for &(upstream_index, delay) in cascade.upstream_of(index) {
                                let delay = delay as usize;
                                if delay <= t {
                                    let source_t = t - delay;
                                    let upstream_plant = &plants[upstream_index];
                                    entries.push(RowEntry {
                                        col: vars.index_of(VariableFamily::TurbineOutflow, &upstream_plant.id, source_t).unwrap(),
                                        coeff: -alpha,
                                    });
                                    if config.include_spill {
                                        if let Some(upstream_spill) = vars.index_of(VariableFamily::Spillage, &upstream_plant.id, source_t) {
                                            entries.push(RowEntry { col: upstream_spill, coeff: -alpha });
                                        }
                                    }
                                }
                            }

                            if config.include_pumping {
                                if let (Some(eta), Some(pump)) = (plant.pump_efficiency(), pump_of(t)) {
                                    entries.push(RowEntry { col: pump, coeff: -eta * alpha });
                                }
                            }

                            model.add_equality(rhs, entries, RowTag::Other("hydro_water_balance"));
                            n_constraints += 1;
                        }

                        model.add_row(
                            plant.min_volume_hm3,
                            plant.max_volume_hm3,
                            vec![RowEntry { col: s_t, coeff: 1.0 }],
                            RowTag::Other("hydro_storage_envelope"),
                        );
                        n_constraints += 1;
                    }
                }
            }
        }

        BuildResult::ok(KIND, n_constraints, warnings)
    }
}
