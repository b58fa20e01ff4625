//! Variable manager (§4.2): allocates one decision variable per `(family, entity, period)` and
//! hands out stable integer indices. Variables are plain specs here, not solver objects - the
//! solver adapter is the only place that talks to an actual LP/MILP backend (§9 "Variables as
//! indices, not objects").

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::entities::{HydroKind, Id};
use crate::system::System;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableFamily {
    ThermalGeneration,
    ThermalCommitment,
    ThermalStartup,
    ThermalShutdown,
    HydroGeneration,
    TurbineOutflow,
    ReservoirStorage,
    Spillage,
    Pumping,
    RenewableGeneration,
    Curtailment,
    InterconnectionFlow,
    Deficit,
}

impl VariableFamily {
    pub fn is_binary(self) -> bool {
        matches!(self, VariableFamily::ThermalCommitment | VariableFamily::ThermalStartup | VariableFamily::ThermalShutdown)
    }
}

/// Which families to materialize, independent of which constraint builders are enabled - a
/// builder that is skipped still needs its variables to exist if another builder or the
/// objective references them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledFamilies {
    pub thermal: bool,
    pub hydro: bool,
    pub pumping: bool,
    pub spill: bool,
    pub renewable: bool,
    pub interconnection: bool,
    pub deficit: bool,
}

impl Default for EnabledFamilies {
    fn default() -> Self {
        Self {
            thermal: true,
            hydro: true,
            pumping: true,
            spill: true,
            renewable: true,
            interconnection: true,
            deficit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSpec {
    pub family: VariableFamily,
    pub entity_index: usize,
    pub period: usize,
    pub lower: f64,
    pub upper: f64,
    pub is_integer: bool,
}

/// The frozen result of `create_variables`: every variable spec plus the index maps needed to
/// find a variable's global position from `(family, entity_id, period)` in constant time.
#[derive(Debug, Clone)]
pub struct VariableSet {
    pub specs: Vec<VariableSpec>,
    entity_order: HashMap<VariableFamily, IndexMap<Id, usize>>,
    entity_labels: HashMap<VariableFamily, Vec<Id>>,
    global_index: HashMap<(VariableFamily, usize, usize), usize>,
    pub horizon_periods: usize,
}

impl VariableSet {
    /// Constant-time lookup of the global variable index for `(family, entity_id, period)`.
    /// Returns `None` if the family was not materialized or the entity/period is out of range.
    pub fn index_of(&self, family: VariableFamily, entity_id: &Id, period: usize) -> Option<usize> {
        let entity_index = *self.entity_order.get(&family)?.get(entity_id)?;
        self.global_index.get(&(family, entity_index, period)).copied()
    }

    pub fn entity_index_of(&self, family: VariableFamily, entity_id: &Id) -> Option<usize> {
        self.entity_order.get(&family)?.get(entity_id).copied()
    }

    pub fn entity_count(&self, family: VariableFamily) -> usize {
        self.entity_order.get(&family).map(|m| m.len()).unwrap_or(0)
    }

    pub fn spec(&self, global_index: usize) -> &VariableSpec {
        &self.specs[global_index]
    }

    /// Reverse of `index_of`: recovers `(family, entity_id)` for a global variable index (§4.5,
    /// §4.6 "primal variable values keyed by (family, entity_id, t)"). The period is available
    /// separately from `spec(global_index).period`.
    pub fn label(&self, global_index: usize) -> (VariableFamily, &Id) {
        let spec = &self.specs[global_index];
        let id = &self.entity_labels[&spec.family][spec.entity_index];
        (spec.family, id)
    }
}

pub struct VariableManager;

impl VariableManager {
    /// Builds every materialized variable family in sorted-id order (§4.1, §4.2), returning a
    /// frozen `VariableSet`. `horizon_periods` periods are allocated per entity; period indices
    /// are zero-based internally (`0..horizon_periods`) even though the spec writes `1..T`.
    pub fn create_variables(system: &System, enabled: EnabledFamilies) -> VariableSet {
        let mut specs = Vec::new();
        let mut entity_order: HashMap<VariableFamily, IndexMap<Id, usize>> = HashMap::new();
        let mut entity_labels: HashMap<VariableFamily, Vec<Id>> = HashMap::new();
        let mut global_index = HashMap::new();
        let t_count = system.horizon_periods;

        if enabled.thermal {
            let mut order = IndexMap::new();
            for (entity_index, plant) in system.thermal_plants().enumerate() {
                order.insert(plant.id.clone(), entity_index);
                for t in 0..t_count {
                    push(&mut specs, &mut global_index, VariableFamily::ThermalGeneration, entity_index, t, 0.0, plant.capacity_mw, false);
                    push(&mut specs, &mut global_index, VariableFamily::ThermalCommitment, entity_index, t, 0.0, 1.0, true);
                    push(&mut specs, &mut global_index, VariableFamily::ThermalStartup, entity_index, t, 0.0, 1.0, true);
                    push(&mut specs, &mut global_index, VariableFamily::ThermalShutdown, entity_index, t, 0.0, 1.0, true);
                }
            }
            let labels: Vec<Id> = order.keys().cloned().collect();
            entity_order.insert(VariableFamily::ThermalGeneration, order.clone());
            entity_order.insert(VariableFamily::ThermalCommitment, order.clone());
            entity_order.insert(VariableFamily::ThermalStartup, order.clone());
            entity_order.insert(VariableFamily::ThermalShutdown, order);
            entity_labels.insert(VariableFamily::ThermalGeneration, labels.clone());
            entity_labels.insert(VariableFamily::ThermalCommitment, labels.clone());
            entity_labels.insert(VariableFamily::ThermalStartup, labels.clone());
            entity_labels.insert(VariableFamily::ThermalShutdown, labels);
        }

        if enabled.hydro {
            let mut order = IndexMap::new();
            for (entity_index, plant) in system.hydro_plants().enumerate() {
                order.insert(plant.id.clone(), entity_index);
                for t in 0..t_count {
                    push(&mut specs, &mut global_index, VariableFamily::HydroGeneration, entity_index, t, plant.min_generation_mw, plant.max_generation_mw, false);
                    push(&mut specs, &mut global_index, VariableFamily::TurbineOutflow, entity_index, t, plant.min_outflow_m3s, plant.max_outflow_m3s, false);
                    if plant.is_reservoir_like() {
                        push(&mut specs, &mut global_index, VariableFamily::ReservoirStorage, entity_index, t, plant.min_volume_hm3, plant.max_volume_hm3, false);
                    }
                    if enabled.spill {
                        let spill_upper = if plant.is_reservoir_like() { f64::INFINITY } else { 0.0 };
                        push(&mut specs, &mut global_index, VariableFamily::Spillage, entity_index, t, 0.0, spill_upper, false);
                    }
                    if enabled.pumping && matches!(plant.kind, HydroKind::PumpedStorage { .. }) {
                        push(&mut specs, &mut global_index, VariableFamily::Pumping, entity_index, t, 0.0, f64::INFINITY, false);
                    }
                }
            }
            let labels: Vec<Id> = order.keys().cloned().collect();
            entity_order.insert(VariableFamily::HydroGeneration, order.clone());
            entity_order.insert(VariableFamily::TurbineOutflow, order.clone());
            entity_order.insert(VariableFamily::ReservoirStorage, order.clone());
            entity_order.insert(VariableFamily::Spillage, order.clone());
            entity_order.insert(VariableFamily::Pumping, order);
            entity_labels.insert(VariableFamily::HydroGeneration, labels.clone());
            entity_labels.insert(VariableFamily::TurbineOutflow, labels.clone());
            entity_labels.insert(VariableFamily::ReservoirStorage, labels.clone());
            entity_labels.insert(VariableFamily::Spillage, labels.clone());
            entity_labels.insert(VariableFamily::Pumping, labels);
        }

        if enabled.renewable {
            let mut order = IndexMap::new();
            for (entity_index, plant) in system.renewable_plants().enumerate() {
                order.insert(plant.id.clone(), entity_index);
                for t in 0..t_count {
                    push(&mut specs, &mut global_index, VariableFamily::RenewableGeneration, entity_index, t, plant.min_generation_mw, plant.max_generation_mw.max(plant.installed_capacity_mw), false);
                    push(&mut specs, &mut global_index, VariableFamily::Curtailment, entity_index, t, 0.0, plant.installed_capacity_mw, false);
                }
            }
            let labels: Vec<Id> = order.keys().cloned().collect();
            entity_order.insert(VariableFamily::RenewableGeneration, order.clone());
            entity_order.insert(VariableFamily::Curtailment, order);
            entity_labels.insert(VariableFamily::RenewableGeneration, labels.clone());
            entity_labels.insert(VariableFamily::Curtailment, labels);
        }

        if enabled.interconnection {
            let mut order = IndexMap::new();
            for (entity_index, ic) in system.interconnections().enumerate() {
                order.insert(ic.id.clone(), entity_index);
                for t in 0..t_count {
                    push(&mut specs, &mut global_index, VariableFamily::InterconnectionFlow, entity_index, t, -ic.capacity_mw, ic.capacity_mw, false);
                }
            }
            let labels: Vec<Id> = order.keys().cloned().collect();
            entity_order.insert(VariableFamily::InterconnectionFlow, order);
            entity_labels.insert(VariableFamily::InterconnectionFlow, labels);
        }

        if enabled.deficit {
            let mut order = IndexMap::new();
            for (entity_index, submarket) in system.submarkets().enumerate() {
                order.insert(submarket.id.clone(), entity_index);
                for t in 0..t_count {
                    push(&mut specs, &mut global_index, VariableFamily::Deficit, entity_index, t, 0.0, f64::INFINITY, false);
                }
            }
            let labels: Vec<Id> = order.keys().cloned().collect();
            entity_order.insert(VariableFamily::Deficit, order);
            entity_labels.insert(VariableFamily::Deficit, labels);
        }

        VariableSet {
            specs,
            entity_order,
            entity_labels,
            global_index,
            horizon_periods: t_count,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn push(
    specs: &mut Vec<VariableSpec>,
    global_index: &mut HashMap<(VariableFamily, usize, usize), usize>,
    family: VariableFamily,
    entity_index: usize,
    period: usize,
    lower: f64,
    upper: f64,
    is_integer: bool,
) {
    let global = specs.len();
    specs.push(VariableSpec {
        family,
        entity_index,
        period,
        lower,
        upper,
        is_integer,
    });
    global_index.insert((family, entity_index, period), global);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FuelType, HydroKindTag, Submarket, ThermalKind};
    use crate::system::SystemInput;
    use chrono::NaiveDate;

    fn system() -> System {
        let sm = Submarket::new("SE", "SE", "SE", "BR").unwrap();
        let plant = crate::entities::ThermalPlant::new(
            "T1", "Plant", ThermalKind::Conventional, None, Id::new("Submarket", "SE").unwrap(), FuelType::NaturalGas,
            100.0, 20.0, 100.0, 30.0, 30.0, 2, 2, 100.0, None, 500.0, 200.0, false, false,
        )
        .unwrap();
        let input = SystemInput {
            submarkets: vec![sm],
            thermal_plants: vec![plant],
            ..Default::default()
        };
        System::build(input, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), 3, 1.0).unwrap()
    }

    #[test]
    fn thermal_generation_indices_are_stable_per_period() {
        let sys = system();
        let vars = VariableManager::create_variables(&sys, EnabledFamilies::default());
        let id = Id::new("ThermalPlant", "T1").unwrap();
        let i0 = vars.index_of(VariableFamily::ThermalGeneration, &id, 0).unwrap();
        let i1 = vars.index_of(VariableFamily::ThermalGeneration, &id, 1).unwrap();
        assert_ne!(i0, i1);
        assert_eq!(vars.spec(i0).period, 0);
        assert_eq!(vars.spec(i1).period, 1);
    }

    #[test]
    fn disabled_family_has_no_entries() {
        let sys = system();
        let mut enabled = EnabledFamilies::default();
        enabled.thermal = false;
        let vars = VariableManager::create_variables(&sys, enabled);
        assert_eq!(vars.entity_count(VariableFamily::ThermalGeneration), 0);
    }
}
