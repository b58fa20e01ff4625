use serde::{Deserialize, Serialize};

use super::error::InvalidField;
use super::ids::Id;
use super::validate::{require_non_negative, require_ordered, require_unit_interval_open_low};

/// Default round-trip pumping efficiency applied when a `PumpedStorage` plant is constructed
/// without an explicit `pump_efficiency` (§9, §11). Exposed as a constant rather than buried in
/// the constructor so callers can cite it.
pub const DEFAULT_PUMP_EFFICIENCY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HydroKind {
    Reservoir,
    RunOfRiver,
    PumpedStorage { pump_efficiency_bp: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydroPlant {
    pub id: Id,
    pub name: String,
    pub kind: HydroKind,
    pub bus_id: Option<Id>,
    pub submarket_id: Id,
    pub max_volume_hm3: f64,
    pub min_volume_hm3: f64,
    pub initial_volume_hm3: f64,
    pub max_outflow_m3s: f64,
    pub min_outflow_m3s: f64,
    pub max_generation_mw: f64,
    pub min_generation_mw: f64,
    pub efficiency: f64,
    pub water_value_rs_per_hm3: f64,
    pub downstream_plant_id: Option<Id>,
    pub water_travel_time_h: Option<f64>,
}

impl HydroPlant {
    /// Builds and validates a `HydroPlant` (§3.1). `pump_efficiency` is only meaningful for
    /// `HydroKind::PumpedStorage`; pass `None` there to take the default of
    /// `DEFAULT_PUMP_EFFICIENCY` (§9 decision record) and `None` for every other kind.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind_tag: HydroKindTag,
        pump_efficiency: Option<f64>,
        bus_id: Option<Id>,
        submarket_id: Id,
        max_volume_hm3: f64,
        min_volume_hm3: f64,
        initial_volume_hm3: f64,
        max_outflow_m3s: f64,
        min_outflow_m3s: f64,
        max_generation_mw: f64,
        min_generation_mw: f64,
        efficiency: f64,
        water_value_rs_per_hm3: f64,
        downstream_plant_id: Option<Id>,
        water_travel_time_h: Option<f64>,
    ) -> Result<Self, InvalidField> {
        const E: &str = "HydroPlant";
        let id = Id::new(E, id)?;

        require_ordered(E, "min_volume_hm3", min_volume_hm3, "initial_volume_hm3", initial_volume_hm3)?;
        require_ordered(E, "initial_volume_hm3", initial_volume_hm3, "max_volume_hm3", max_volume_hm3)?;
        require_ordered(E, "min_outflow_m3s", min_outflow_m3s, "max_outflow_m3s", max_outflow_m3s)?;
        require_non_negative(E, "min_generation_MW", min_generation_mw)?;
        require_ordered(E, "min_generation_MW", min_generation_mw, "max_generation_MW", max_generation_mw)?;
        require_unit_interval_open_low(E, "efficiency", efficiency)?;
        require_non_negative(E, "water_value_Rs_per_hm3", water_value_rs_per_hm3)?;

        if downstream_plant_id.is_some() != water_travel_time_h.is_some() {
            return Err(InvalidField::new(
                E,
                "downstream_plant_id",
                format!("{downstream_plant_id:?}/{water_travel_time_h:?}"),
                "downstream_plant_id and water_travel_time_h must be both set or both absent",
            ));
        }
        if let Some(travel) = water_travel_time_h {
            require_non_negative(E, "water_travel_time_h", travel)?;
        }

        let kind = match kind_tag {
            HydroKindTag::Reservoir => HydroKind::Reservoir,
            HydroKindTag::RunOfRiver => HydroKind::RunOfRiver,
            HydroKindTag::PumpedStorage => {
                let eff = pump_efficiency.unwrap_or(DEFAULT_PUMP_EFFICIENCY);
                require_unit_interval_open_low(E, "pump_efficiency", eff)?;
                HydroKind::PumpedStorage {
                    pump_efficiency_bp: (eff * 10_000.0).round() as u32,
                }
            }
        };

        Ok(Self {
            id,
            name: name.into(),
            kind,
            bus_id,
            submarket_id,
            max_volume_hm3,
            min_volume_hm3,
            initial_volume_hm3,
            max_outflow_m3s,
            min_outflow_m3s,
            max_generation_mw,
            min_generation_mw,
            efficiency,
            water_value_rs_per_hm3,
            downstream_plant_id,
            water_travel_time_h,
        })
    }

    pub fn is_reservoir_like(&self) -> bool {
        !matches!(self.kind, HydroKind::RunOfRiver)
    }

    pub fn pump_efficiency(&self) -> Option<f64> {
        match self.kind {
            HydroKind::PumpedStorage { pump_efficiency_bp } => Some(pump_efficiency_bp as f64 / 10_000.0),
            _ => None,
        }
    }

    /// Linear production-function coefficient `ρ = max_generation_MW / max_outflow_m3s` (§4.3.3).
    /// `None` when `max_outflow_m3s` is zero (a run-of-river placeholder with no turbine path).
    pub fn production_coefficient(&self) -> Option<f64> {
        if self.max_outflow_m3s > 0.0 {
            Some(self.max_generation_mw / self.max_outflow_m3s)
        } else {
            None
        }
    }
}

/// Discriminant used at construction time; `pump_efficiency` is only consulted for `PumpedStorage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydroKindTag {
    Reservoir,
    RunOfRiver,
    PumpedStorage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sm() -> Id {
        Id::new("Submarket", "SE").unwrap()
    }

    #[test]
    fn downstream_and_travel_time_must_be_paired() {
        let result = HydroPlant::new(
            "H1", "Upstream", HydroKindTag::Reservoir, None, None, sm(),
            1000.0, 100.0, 500.0, 300.0, 0.0, 200.0, 0.0, 0.9, 10.0,
            Some(Id::new("HydroPlant", "H2").unwrap()), None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn pumped_storage_defaults_efficiency() {
        let plant = HydroPlant::new(
            "H1", "Pump", HydroKindTag::PumpedStorage, None, None, sm(),
            1000.0, 100.0, 500.0, 300.0, 0.0, 200.0, 0.0, 0.9, 10.0, None, None,
        )
        .unwrap();
        assert!((plant.pump_efficiency().unwrap() - DEFAULT_PUMP_EFFICIENCY).abs() < 1e-9);
    }

    #[test]
    fn production_coefficient_matches_ratio() {
        let plant = HydroPlant::new(
            "H1", "Res", HydroKindTag::Reservoir, None, None, sm(),
            1000.0, 100.0, 500.0, 300.0, 0.0, 150.0, 0.0, 0.9, 10.0, None, None,
        )
        .unwrap();
        assert!((plant.production_coefficient().unwrap() - 0.5).abs() < 1e-9);
    }
}
