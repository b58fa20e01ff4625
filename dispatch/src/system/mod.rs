//! The `System` aggregate (§3.2, §4.1): an immutable, cross-validated collection of entities plus
//! the derived hydro cascade topology. Nothing downstream of `System::build` ever re-validates a
//! cross-reference; constraint builders trust it completely.

pub mod cascade;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entities::{Bus, HydroPlant, Id, Interconnection, InvalidField, InvalidSystem, Line, Load, RenewablePlant, Submarket, ThermalPlant};
use cascade::Cascade;

/// Everything required to assemble a `System`, grouped so `System::build` takes one argument
/// instead of eleven. Produced by loaders (`crate::data`), not hand-built in application code.
#[derive(Debug, Clone, Default)]
pub struct SystemInput {
    pub submarkets: Vec<Submarket>,
    pub buses: Vec<Bus>,
    pub lines: Vec<Line>,
    pub interconnections: Vec<Interconnection>,
    pub thermal_plants: Vec<ThermalPlant>,
    pub hydro_plants: Vec<HydroPlant>,
    pub renewable_plants: Vec<RenewablePlant>,
    pub loads: Vec<Load>,
}

#[derive(Debug, Clone)]
pub struct System {
    pub base_date: NaiveDate,
    pub horizon_periods: usize,
    pub period_duration_hours: f64,
    submarkets: BTreeMap<Id, Submarket>,
    buses: BTreeMap<Id, Bus>,
    lines: BTreeMap<Id, Line>,
    interconnections: BTreeMap<Id, Interconnection>,
    thermal_plants: BTreeMap<Id, ThermalPlant>,
    hydro_plants: BTreeMap<Id, HydroPlant>,
    renewable_plants: BTreeMap<Id, RenewablePlant>,
    loads: BTreeMap<Id, Load>,
    cascade: Cascade,
}

fn insert_unique<T>(entity: &'static str, map: &mut BTreeMap<Id, T>, id: Id, value: T) -> Result<(), InvalidSystem> {
    if map.insert(id.clone(), value).is_some() {
        return Err(InvalidSystem::new(format!("duplicate {entity} id '{id}'")));
    }
    Ok(())
}

impl System {
    /// Validates and assembles a `System` from raw collections (§3.2). Runs, in order: duplicate
    /// id checks per entity kind, bus/submarket cross-reference checks, horizon-length checks on
    /// every per-period series, and cascade construction (which itself rejects unresolved
    /// downstream pointers and cycles).
    pub fn build(input: SystemInput, base_date: NaiveDate, horizon_periods: usize, period_duration_hours: f64) -> Result<Self, InvalidSystem> {
        if horizon_periods == 0 {
            return Err(InvalidSystem::new("horizon_periods must be > 0"));
        }
        if period_duration_hours <= 0.0 {
            return Err(InvalidSystem::new("period_duration_hours must be > 0"));
        }

        let mut submarkets = BTreeMap::new();
        let mut seen_codes = std::collections::HashSet::new();
        for s in input.submarkets {
            if !seen_codes.insert(s.code.clone()) {
                return Err(InvalidSystem::new(format!("duplicate Submarket code '{}'", s.code)));
            }
            insert_unique("Submarket", &mut submarkets, s.id.clone(), s)?;
        }

        let mut buses = BTreeMap::new();
        for b in input.buses {
            insert_unique("Bus", &mut buses, b.id.clone(), b)?;
        }

        let mut lines = BTreeMap::new();
        for l in input.lines {
            if !buses.contains_key(&l.from_bus_id) {
                return Err(InvalidSystem::new(format!("Line '{}' has from_bus_id '{}' with no matching Bus", l.id, l.from_bus_id)));
            }
            if !buses.contains_key(&l.to_bus_id) {
                return Err(InvalidSystem::new(format!("Line '{}' has to_bus_id '{}' with no matching Bus", l.id, l.to_bus_id)));
            }
            insert_unique("Line", &mut lines, l.id.clone(), l)?;
        }

        let mut interconnections = BTreeMap::new();
        for ic in input.interconnections {
            require_submarket(&submarkets, &ic.from_submarket_id, "Interconnection", &ic.id)?;
            require_submarket(&submarkets, &ic.to_submarket_id, "Interconnection", &ic.id)?;
            insert_unique("Interconnection", &mut interconnections, ic.id.clone(), ic)?;
        }

        let mut thermal_plants = BTreeMap::new();
        for p in input.thermal_plants {
            require_submarket(&submarkets, &p.submarket_id, "ThermalPlant", &p.id)?;
            require_bus(&buses, &p.bus_id, "ThermalPlant", &p.id)?;
            if let Some(schedule) = &p.fuel_cost_schedule {
                require_horizon_length("ThermalPlant", &p.id, "fuel_cost_schedule", schedule.len(), horizon_periods)?;
            }
            insert_unique("ThermalPlant", &mut thermal_plants, p.id.clone(), p)?;
        }

        let mut hydro_plants = BTreeMap::new();
        for p in input.hydro_plants {
            require_submarket(&submarkets, &p.submarket_id, "HydroPlant", &p.id)?;
            require_bus(&buses, &p.bus_id, "HydroPlant", &p.id)?;
            insert_unique("HydroPlant", &mut hydro_plants, p.id.clone(), p)?;
        }
        for p in hydro_plants.values() {
            if let Some(downstream_id) = &p.downstream_plant_id {
                if !hydro_plants.contains_key(downstream_id) {
                    return Err(InvalidSystem::new(format!(
                        "HydroPlant '{}' has downstream_plant_id '{}' that does not resolve to any HydroPlant",
                        p.id, downstream_id
                    )));
                }
            }
        }

        let mut renewable_plants = BTreeMap::new();
        for p in input.renewable_plants {
            require_submarket(&submarkets, &p.submarket_id, "RenewablePlant", &p.id)?;
            require_bus(&buses, &p.bus_id, "RenewablePlant", &p.id)?;
            require_horizon_length("RenewablePlant", &p.id, "capacity_forecast_MW", p.capacity_forecast_mw.len(), horizon_periods)?;
            insert_unique("RenewablePlant", &mut renewable_plants, p.id.clone(), p)?;
        }

        let mut loads = BTreeMap::new();
        for l in input.loads {
            require_submarket(&submarkets, &l.submarket_id, "Load", &l.id)?;
            require_bus(&buses, &l.bus_id, "Load", &l.id)?;
            require_horizon_length("Load", &l.id, "load_profile", l.load_profile.len(), horizon_periods)?;
            insert_unique("Load", &mut loads, l.id.clone(), l)?;
        }

        let sorted_hydro: Vec<HydroPlant> = hydro_plants.values().cloned().collect();
        let cascade = Cascade::build(&sorted_hydro, period_duration_hours)?;

        Ok(Self {
            base_date,
            horizon_periods,
            period_duration_hours,
            submarkets,
            buses,
            lines,
            interconnections,
            thermal_plants,
            hydro_plants,
            renewable_plants,
            loads,
            cascade,
        })
    }

    pub fn submarkets(&self) -> impl Iterator<Item = &Submarket> {
        self.submarkets.values()
    }

    pub fn submarket(&self, id: &Id) -> Option<&Submarket> {
        self.submarkets.get(id)
    }

    pub fn buses(&self) -> impl Iterator<Item = &Bus> {
        self.buses.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn interconnections(&self) -> impl Iterator<Item = &Interconnection> {
        self.interconnections.values()
    }

    pub fn thermal_plants(&self) -> impl Iterator<Item = &ThermalPlant> {
        self.thermal_plants.values()
    }

    pub fn thermal_plant(&self, id: &Id) -> Option<&ThermalPlant> {
        self.thermal_plants.get(id)
    }

    pub fn hydro_plants(&self) -> impl Iterator<Item = &HydroPlant> {
        self.hydro_plants.values()
    }

    pub fn hydro_plant(&self, id: &Id) -> Option<&HydroPlant> {
        self.hydro_plants.get(id)
    }

    /// Position of a hydro plant in the sorted-id array used by the cascade (§3.3). Constant
    /// time would require a side index; this is only called during `System::build`-time wiring
    /// of builders, not in per-period hot loops, so a linear scan over a typically small hydro
    /// fleet is acceptable.
    pub fn hydro_index_of(&self, id: &Id) -> Option<usize> {
        self.hydro_plants.keys().position(|k| k == id)
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn renewable_plants(&self) -> impl Iterator<Item = &RenewablePlant> {
        self.renewable_plants.values()
    }

    pub fn loads(&self) -> impl Iterator<Item = &Load> {
        self.loads.values()
    }

    pub fn thermal_plants_in(&self, submarket_id: &Id) -> impl Iterator<Item = &ThermalPlant> {
        self.thermal_plants.values().filter(move |p| &p.submarket_id == submarket_id)
    }

    pub fn hydro_plants_in(&self, submarket_id: &Id) -> impl Iterator<Item = &HydroPlant> {
        self.hydro_plants.values().filter(move |p| &p.submarket_id == submarket_id)
    }

    pub fn renewable_plants_in(&self, submarket_id: &Id) -> impl Iterator<Item = &RenewablePlant> {
        self.renewable_plants.values().filter(move |p| &p.submarket_id == submarket_id)
    }

    pub fn loads_in(&self, submarket_id: &Id) -> impl Iterator<Item = &Load> {
        self.loads.values().filter(move |l| &l.submarket_id == submarket_id)
    }

    pub fn interconnections_from(&self, submarket_id: &Id) -> impl Iterator<Item = &Interconnection> {
        self.interconnections.values().filter(move |ic| &ic.from_submarket_id == submarket_id)
    }

    pub fn interconnections_to(&self, submarket_id: &Id) -> impl Iterator<Item = &Interconnection> {
        self.interconnections.values().filter(move |ic| &ic.to_submarket_id == submarket_id)
    }
}

fn require_submarket(submarkets: &BTreeMap<Id, Submarket>, submarket_id: &Id, entity: &'static str, entity_id: &Id) -> Result<(), InvalidSystem> {
    if submarkets.contains_key(submarket_id) {
        Ok(())
    } else {
        Err(InvalidSystem::new(format!("{entity} '{entity_id}' has submarket_id '{submarket_id}' with no matching Submarket")))
    }
}

fn require_bus(buses: &BTreeMap<Id, Bus>, bus_id: &Option<Id>, entity: &'static str, entity_id: &Id) -> Result<(), InvalidSystem> {
    match bus_id {
        Some(id) if !buses.contains_key(id) => Err(InvalidSystem::new(format!("{entity} '{entity_id}' has bus_id '{id}' with no matching Bus"))),
        _ => Ok(()),
    }
}

fn require_horizon_length(entity: &'static str, entity_id: &Id, field: &'static str, actual: usize, horizon_periods: usize) -> Result<(), InvalidSystem> {
    if actual < horizon_periods {
        return Err(InvalidSystem::from(InvalidField::new(
            entity,
            field,
            format!("len={actual}"),
            format!("must cover horizon_periods ({horizon_periods})"),
        )));
    }
    let _ = entity_id;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FuelType, HydroKindTag, ThermalKind};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn sm(code: &str) -> Submarket {
        Submarket::new(code, code, code, "BR").unwrap()
    }

    #[test]
    fn rejects_duplicate_submarket_id() {
        let input = SystemInput {
            submarkets: vec![sm("SE"), sm("SE")],
            ..Default::default()
        };
        assert!(System::build(input, date(), 24, 1.0).is_err());
    }

    #[test]
    fn rejects_duplicate_submarket_code() {
        let input = SystemInput {
            submarkets: vec![Submarket::new("SE", "Southeast", "SE", "BR").unwrap(), Submarket::new("S", "South", "SE", "BR").unwrap()],
            ..Default::default()
        };
        assert!(System::build(input, date(), 24, 1.0).is_err());
    }

    #[test]
    fn rejects_thermal_plant_with_unknown_submarket() {
        let plant = ThermalPlant::new(
            "T1", "Plant", ThermalKind::Conventional, None, Id::new("Submarket", "GHOST").unwrap(), FuelType::NaturalGas,
            100.0, 20.0, 100.0, 30.0, 30.0, 0, 0, 100.0, None, 0.0, 0.0, false, false,
        )
        .unwrap();
        let input = SystemInput {
            submarkets: vec![sm("SE")],
            thermal_plants: vec![plant],
            ..Default::default()
        };
        assert!(System::build(input, date(), 24, 1.0).is_err());
    }

    #[test]
    fn rejects_renewable_forecast_shorter_than_horizon() {
        let plant = RenewablePlant::new(
            "W1", "Wind", crate::entities::RenewableKind::Wind, None, Id::new("Submarket", "SE").unwrap(),
            100.0, vec![10.0, 20.0], true, 0.0, 100.0, 60.0, 60.0, false,
        )
        .unwrap();
        let input = SystemInput {
            submarkets: vec![sm("SE")],
            renewable_plants: vec![plant],
            ..Default::default()
        };
        assert!(System::build(input, date(), 24, 1.0).is_err());
    }

    #[test]
    fn builds_minimal_system_and_exposes_sorted_iteration() {
        let h1 = HydroPlant::new(
            "H2", "Plant2", HydroKindTag::Reservoir, None, None, Id::new("Submarket", "SE").unwrap(),
            1000.0, 100.0, 500.0, 300.0, 0.0, 200.0, 0.0, 0.9, 10.0, None, None,
        )
        .unwrap();
        let h0 = HydroPlant::new(
            "H1", "Plant1", HydroKindTag::Reservoir, None, None, Id::new("Submarket", "SE").unwrap(),
            1000.0, 100.0, 500.0, 300.0, 0.0, 200.0, 0.0, 0.9, 10.0, None, None,
        )
        .unwrap();
        let input = SystemInput {
            submarkets: vec![sm("SE")],
            hydro_plants: vec![h1, h0],
            ..Default::default()
        };
        let system = System::build(input, date(), 2, 1.0).unwrap();
        let ids: Vec<String> = system.hydro_plants().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["H1".to_string(), "H2".to_string()]);
    }
}
