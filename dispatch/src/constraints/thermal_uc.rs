use crate::config::ThermalUcConfig;
use crate::solver::model::{Model, RowEntry, RowTag};
use crate::system::System;
use crate::variables::{VariableFamily, VariableSet};

use super::BuildResult;

/// Thermal unit-commitment constraints (§4.3.1): commitment-coupled capacity bounds, ramping,
/// the startup/shutdown state transition, minimum up/down time, and must-run pinning.
pub struct ThermalUcBuilder;

impl ThermalUcBuilder {
    pub fn build(model: &mut Model, system: &System, vars: &VariableSet, config: &ThermalUcConfig) -> BuildResult {
        const KIND: &str = "ThermalUnitCommitment";
        let mut warnings = Vec::new();
        let mut n_constraints = 0;
        let t_count = vars.horizon_periods;

        for plant in system.thermal_plants() {
            let g_of = |t: usize| vars.index_of(VariableFamily::ThermalGeneration, &plant.id, t);
            let u_of = |t: usize| vars.index_of(VariableFamily::ThermalCommitment, &plant.id, t);
            let v_of = |t: usize| vars.index_of(VariableFamily::ThermalStartup, &plant.id, t);
            let w_of = |t: usize| vars.index_of(VariableFamily::ThermalShutdown, &plant.id, t);

            let (Some(_), Some(_)) = (g_of(0), u_of(0)) else {
                warnings.push(format!("thermal plant '{}' missing generation/commitment variables", plant.id));
                return BuildResult::failed(KIND, format!("missing required variables for '{}'", plant.id));
            };

            for t in 0..t_count {
                let g = g_of(t).unwrap();
                let u = u_of(t).unwrap();
                let v = v_of(t).unwrap();
                let w = w_of(t).unwrap();

                // 1. Capacity with commitment: min*u <= g <= max*u, split into two rows.
                model.add_row(
                    0.0,
                    f64::INFINITY,
                    vec![RowEntry { col: g, coeff: 1.0 }, RowEntry { col: u, coeff: -plant.min_generation_mw }],
                    RowTag::Other("thermal_uc_min"),
                );
                n_constraints += 1;
                model.add_row(
                    f64::NEG_INFINITY,
                    0.0,
                    vec![RowEntry { col: g, coeff: 1.0 }, RowEntry { col: u, coeff: -plant.max_generation_mw }],
                    RowTag::Other("thermal_uc_max"),
                );
                n_constraints += 1;

                // 3. Commitment state transition and v+w <= 1.
                let prev_u = if t == 0 { None } else { u_of(t - 1) };
                match prev_u {
                    Some(prev) => {
                        model.add_equality(
                            0.0,
                            vec![
                                RowEntry { col: u, coeff: 1.0 },
                                RowEntry { col: prev, coeff: -1.0 },
                                RowEntry { col: v, coeff: -1.0 },
                                RowEntry { col: w, coeff: 1.0 },
                            ],
                            RowTag::Other("thermal_uc_state"),
                        );
                        n_constraints += 1;
                    }
                    None => {
                        let initial = if plant.initial_commitment { 1.0 } else { 0.0 };
                        model.add_equality(
                            initial,
                            vec![RowEntry { col: u, coeff: 1.0 }, RowEntry { col: v, coeff: -1.0 }, RowEntry { col: w, coeff: 1.0 }],
                            RowTag::Other("thermal_uc_state_initial"),
                        );
                        n_constraints += 1;
                    }
                }
                model.add_upper_bound(1.0, vec![RowEntry { col: v, coeff: 1.0 }, RowEntry { col: w, coeff: 1.0 }], RowTag::Other("thermal_uc_start_stop_exclusive"));
                n_constraints += 1;

                // 6. Must-run pins u[i,t] = 1.
                if plant.must_run {
                    model.add_equality(1.0, vec![RowEntry { col: u, coeff: 1.0 }], RowTag::Other("thermal_uc_must_run"));
                    n_constraints += 1;
                }

                // 2. Ramping.
                if config.enable_ramping && t > 0 {
                    let g_prev = g_of(t - 1).unwrap();
                    let ramp_up = plant.ramp_up_mw_per_hour();
                    let ramp_down = plant.ramp_down_mw_per_hour();
                    model.add_upper_bound(ramp_up, vec![RowEntry { col: g, coeff: 1.0 }, RowEntry { col: g_prev, coeff: -1.0 }], RowTag::Other("thermal_uc_ramp_up"));
                    n_constraints += 1;
                    model.add_upper_bound(ramp_down, vec![RowEntry { col: g_prev, coeff: 1.0 }, RowEntry { col: g, coeff: -1.0 }], RowTag::Other("thermal_uc_ramp_down"));
                    n_constraints += 1;
                }
            }

            // 4. Minimum up time; 5. minimum down time. Windows clipped before t = U_i/D_i (§4.3.1 edge case).
            if config.enable_min_up_down_time {
                if plant.min_up_time_h > 0 {
                    let window = plant.min_up_time_h as usize;
                    for t in window - 1..t_count {
                        let v = v_of(t).unwrap();
                        let mut entries = vec![RowEntry { col: v, coeff: -(window as f64) }];
                        for tau in (t + 1 - window)..=t {
                            entries.push(RowEntry { col: u_of(tau).unwrap(), coeff: 1.0 });
                        }
                        model.add_lower_bound(0.0, entries, RowTag::Other("thermal_uc_min_up_time"));
                        n_constraints += 1;
                    }
                }
                if plant.min_down_time_h > 0 {
                    let window = plant.min_down_time_h as usize;
                    for t in window - 1..t_count {
                        let w = w_of(t).unwrap();
                        let mut entries = vec![RowEntry { col: w, coeff: -(window as f64) }];
                        for tau in (t + 1 - window)..=t {
                            entries.push(RowEntry { col: u_of(tau).unwrap(), coeff: -1.0 });
                        }
                        model.add_lower_bound(-(window as f64), entries, RowTag::Other("thermal_uc_min_down_time"));
                        n_constraints += 1;
                    }
                }
            }
        }

        BuildResult::ok(KIND, n_constraints, warnings)
    }
}
