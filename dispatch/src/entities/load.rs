use serde::{Deserialize, Serialize};

use super::error::InvalidField;
use super::ids::Id;
use super::validate::{require_finite_non_negative_series, require_non_negative};

/// A submarket's demand block (§3.1). Effective demand at period `t` is `base_MW *
/// load_profile[t]`; deficit (unserved energy) is modeled against the aggregate over a
/// submarket's loads in §4.3.5, never against an individual `Load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: Id,
    pub name: String,
    pub bus_id: Option<Id>,
    pub submarket_id: Id,
    pub base_mw: f64,
    /// Multiplicative profile per period. Must be exactly `horizon_periods` long; checked by
    /// `System::build`.
    pub load_profile: Vec<f64>,
}

impl Load {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        bus_id: Option<Id>,
        submarket_id: Id,
        base_mw: f64,
        load_profile: Vec<f64>,
    ) -> Result<Self, InvalidField> {
        const E: &str = "Load";
        let id = Id::new(E, id)?;
        require_non_negative(E, "base_MW", base_mw)?;
        require_finite_non_negative_series(E, "load_profile", &load_profile, None)?;
        Ok(Self {
            id,
            name: name.into(),
            bus_id,
            submarket_id,
            base_mw,
            load_profile,
        })
    }

    pub fn demand_at(&self, t: usize) -> f64 {
        self.base_mw * self.load_profile.get(t).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_profile() {
        let result = Load::new("L1", "SE Demand", None, Id::new("Submarket", "SE").unwrap(), 1000.0, vec![1.0, -0.1]);
        assert!(result.is_err());
    }

    #[test]
    fn demand_at_scales_base_by_profile() {
        let load = Load::new("L1", "SE Demand", None, Id::new("Submarket", "SE").unwrap(), 1000.0, vec![1.0, 1.1]).unwrap();
        assert_eq!(load.demand_at(0), 1000.0);
        assert_eq!(load.demand_at(1), 1100.0);
        assert_eq!(load.demand_at(9), 0.0);
    }
}
