use serde::{Deserialize, Serialize};

use super::error::InvalidField;
use super::ids::Id;
use super::validate::{require_non_negative, require_ordered, require_positive};

/// Fuel class of a thermal plant; drives no behaviour in the core today (it is carried for
/// downstream reporting/export) but is validated as a closed set, matching the spec's enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    NaturalGas,
    Coal,
    FuelOil,
    Diesel,
    Nuclear,
    Biomass,
    Biogas,
    Other,
}

/// Discriminates the two thermal archetypes named by the spec. Both share every field today;
/// the tag exists so constraint builders and future extensions (e.g. combined-cycle specific
/// heat-rate curves) can pattern-match without an open inheritance tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalKind {
    Conventional,
    CombinedCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalPlant {
    pub id: Id,
    pub name: String,
    pub kind: ThermalKind,
    pub bus_id: Option<Id>,
    pub submarket_id: Id,
    pub fuel_type: FuelType,
    pub capacity_mw: f64,
    pub min_generation_mw: f64,
    pub max_generation_mw: f64,
    pub ramp_up_mw_per_min: f64,
    pub ramp_down_mw_per_min: f64,
    pub min_up_time_h: u32,
    pub min_down_time_h: u32,
    pub fuel_cost_rs_per_mwh: f64,
    /// Per-plant time-varying override of `fuel_cost_rs_per_mwh` (§11.1). When present, must be
    /// exactly `horizon_periods` long; validated by `System::build`, not here, since the entity
    /// does not know the horizon at construction time.
    pub fuel_cost_schedule: Option<Vec<f64>>,
    pub startup_cost_rs: f64,
    pub shutdown_cost_rs: f64,
    pub must_run: bool,
    /// Commitment state at `t = 0`, consumed only by the unit-commitment builder's period-1
    /// state-transition equation (§4.3.1.3). Not part of the distilled entity field list; carried
    /// here because the builder has no other source for it.
    pub initial_commitment: bool,
}

impl ThermalPlant {
    /// Builds and validates a `ThermalPlant` from its raw fields.
    ///
    /// Invariants enforced here (§3.1): `0 <= min_generation <= max_generation <= capacity`; all
    /// costs non-negative; ramp rates strictly positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ThermalKind,
        bus_id: Option<Id>,
        submarket_id: Id,
        fuel_type: FuelType,
        capacity_mw: f64,
        min_generation_mw: f64,
        max_generation_mw: f64,
        ramp_up_mw_per_min: f64,
        ramp_down_mw_per_min: f64,
        min_up_time_h: u32,
        min_down_time_h: u32,
        fuel_cost_rs_per_mwh: f64,
        fuel_cost_schedule: Option<Vec<f64>>,
        startup_cost_rs: f64,
        shutdown_cost_rs: f64,
        must_run: bool,
        initial_commitment: bool,
    ) -> Result<Self, InvalidField> {
        const E: &str = "ThermalPlant";
        let id = Id::new(E, id)?;

        require_non_negative(E, "min_generation_MW", min_generation_mw)?;
        require_ordered(E, "min_generation_MW", min_generation_mw, "max_generation_MW", max_generation_mw)?;
        require_ordered(E, "max_generation_MW", max_generation_mw, "capacity_MW", capacity_mw)?;
        require_positive(E, "ramp_up_MW_per_min", ramp_up_mw_per_min)?;
        require_positive(E, "ramp_down_MW_per_min", ramp_down_mw_per_min)?;
        require_non_negative(E, "fuel_cost_Rs_per_MWh", fuel_cost_rs_per_mwh)?;
        require_non_negative(E, "startup_cost_Rs", startup_cost_rs)?;
        require_non_negative(E, "shutdown_cost_Rs", shutdown_cost_rs)?;

        Ok(Self {
            id,
            name: name.into(),
            kind,
            bus_id,
            submarket_id,
            fuel_type,
            capacity_mw,
            min_generation_mw,
            max_generation_mw,
            ramp_up_mw_per_min,
            ramp_down_mw_per_min,
            min_up_time_h,
            min_down_time_h,
            fuel_cost_rs_per_mwh,
            fuel_cost_schedule,
            startup_cost_rs,
            shutdown_cost_rs,
            must_run,
            initial_commitment,
        })
    }

    /// `R+ = ramp_up_MW_per_min * 60`, the per-period ramp-up bound used by §4.3.1.2.
    pub fn ramp_up_mw_per_hour(&self) -> f64 {
        self.ramp_up_mw_per_min * 60.0
    }

    pub fn ramp_down_mw_per_hour(&self) -> f64 {
        self.ramp_down_mw_per_min * 60.0
    }

    pub fn fuel_cost_at(&self, t: usize) -> f64 {
        match &self.fuel_cost_schedule {
            Some(schedule) => schedule.get(t).copied().unwrap_or(self.fuel_cost_rs_per_mwh),
            None => self.fuel_cost_rs_per_mwh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sm() -> Id {
        Id::new("Submarket", "SE").unwrap()
    }

    #[test]
    fn rejects_max_above_capacity() {
        let result = ThermalPlant::new(
            "T1", "Plant", ThermalKind::Conventional, None, sm(), FuelType::NaturalGas,
            100.0, 20.0, 120.0, 30.0, 30.0, 0, 0, 100.0, None, 0.0, 0.0, false, false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_positive_ramp() {
        let result = ThermalPlant::new(
            "T1", "Plant", ThermalKind::Conventional, None, sm(), FuelType::NaturalGas,
            100.0, 20.0, 100.0, 0.0, 30.0, 0, 0, 100.0, None, 0.0, 0.0, false, false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn fuel_cost_schedule_overrides_static_cost() {
        let plant = ThermalPlant::new(
            "T1", "Plant", ThermalKind::Conventional, None, sm(), FuelType::NaturalGas,
            100.0, 20.0, 100.0, 30.0, 30.0, 0, 0, 100.0, Some(vec![80.0, 120.0]), 0.0, 0.0, false, false,
        )
        .unwrap();
        assert_eq!(plant.fuel_cost_at(0), 80.0);
        assert_eq!(plant.fuel_cost_at(1), 120.0);
        assert_eq!(plant.fuel_cost_at(5), 100.0);
    }
}
