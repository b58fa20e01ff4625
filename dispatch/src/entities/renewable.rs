use serde::{Deserialize, Serialize};

use super::error::InvalidField;
use super::ids::Id;
use super::validate::{require_finite_non_negative_series, require_non_negative, require_ordered, require_positive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewableKind {
    Wind,
    Solar,
}

/// A non-dispatchable wind or solar plant with a period-by-period generation ceiling (§3.1,
/// §4.3.4). Unlike thermal/hydro units it has no cost of its own; curtailment is penalized, not
/// its generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewablePlant {
    pub id: Id,
    pub name: String,
    pub kind: RenewableKind,
    pub bus_id: Option<Id>,
    pub submarket_id: Id,
    pub installed_capacity_mw: f64,
    /// Forecast generation ceiling per period, `0 <= capacity_forecast_MW[t] <=
    /// installed_capacity_MW`. Must be exactly `horizon_periods` long; checked by
    /// `System::build`, which alone knows the horizon.
    pub capacity_forecast_mw: Vec<f64>,
    pub curtailment_allowed: bool,
    pub min_generation_mw: f64,
    pub max_generation_mw: f64,
    pub ramp_up_mw_per_min: f64,
    pub ramp_down_mw_per_min: f64,
    pub must_run: bool,
}

impl RenewablePlant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: RenewableKind,
        bus_id: Option<Id>,
        submarket_id: Id,
        installed_capacity_mw: f64,
        capacity_forecast_mw: Vec<f64>,
        curtailment_allowed: bool,
        min_generation_mw: f64,
        max_generation_mw: f64,
        ramp_up_mw_per_min: f64,
        ramp_down_mw_per_min: f64,
        must_run: bool,
    ) -> Result<Self, InvalidField> {
        const E: &str = "RenewablePlant";
        let id = Id::new(E, id)?;
        require_non_negative(E, "installed_capacity_MW", installed_capacity_mw)?;
        require_finite_non_negative_series(E, "capacity_forecast_MW", &capacity_forecast_mw, Some(installed_capacity_mw))?;
        require_non_negative(E, "min_generation_MW", min_generation_mw)?;
        require_ordered(E, "min_generation_MW", min_generation_mw, "max_generation_MW", max_generation_mw)?;
        require_ordered(E, "max_generation_MW", max_generation_mw, "installed_capacity_MW", installed_capacity_mw)?;
        require_positive(E, "ramp_up_MW_per_min", ramp_up_mw_per_min)?;
        require_positive(E, "ramp_down_MW_per_min", ramp_down_mw_per_min)?;
        Ok(Self {
            id,
            name: name.into(),
            kind,
            bus_id,
            submarket_id,
            installed_capacity_mw,
            capacity_forecast_mw,
            curtailment_allowed,
            min_generation_mw,
            max_generation_mw,
            ramp_up_mw_per_min,
            ramp_down_mw_per_min,
            must_run,
        })
    }

    pub fn forecast_at(&self, t: usize) -> f64 {
        self.capacity_forecast_mw.get(t).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sm() -> Id {
        Id::new("Submarket", "NE").unwrap()
    }

    #[test]
    fn rejects_forecast_above_capacity() {
        let result = RenewablePlant::new(
            "W1", "Wind Farm", RenewableKind::Wind, None, sm(),
            100.0, vec![50.0, 150.0], true, 0.0, 100.0, 60.0, 60.0, false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn forecast_at_defaults_to_zero_past_horizon() {
        let plant = RenewablePlant::new(
            "S1", "Solar Farm", RenewableKind::Solar, None, sm(),
            100.0, vec![20.0, 80.0], false, 0.0, 100.0, 60.0, 60.0, false,
        )
        .unwrap();
        assert_eq!(plant.forecast_at(1), 80.0);
        assert_eq!(plant.forecast_at(5), 0.0);
    }
}
