use serde::{Deserialize, Serialize};

use super::error::InvalidField;
use super::ids::Id;
use super::validate::require_positive;

/// An electrical node. Only consumed by the optional DC-equivalent network wrapper; the core
/// dispatch balance (§4.3.5) operates at the submarket level, not the bus level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub id: Id,
    pub name: String,
    pub voltage_kv: f64,
    pub base_kv: f64,
    pub is_reference: bool,
    pub area_id: Option<Id>,
    pub zone_id: Option<Id>,
}

impl Bus {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        voltage_kv: f64,
        base_kv: f64,
        is_reference: bool,
        area_id: Option<Id>,
        zone_id: Option<Id>,
    ) -> Result<Self, InvalidField> {
        let id = Id::new("Bus", id)?;
        require_positive("Bus", "voltage_kV", voltage_kv)?;
        require_positive("Bus", "base_kV", base_kv)?;
        Ok(Self {
            id,
            name: name.into(),
            voltage_kv,
            base_kv,
            is_reference,
            area_id,
            zone_id,
        })
    }
}

/// A bus-level AC/DC transmission element. Not consumed by the core dispatch directly (§3.1);
/// carried only for the optional network wrapper mentioned in §1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: Id,
    pub from_bus_id: Id,
    pub to_bus_id: Id,
    pub max_flow_mw: f64,
    pub min_flow_mw: f64,
    pub resistance_pu: f64,
    pub reactance_pu: f64,
}

impl Line {
    pub fn new(
        id: impl Into<String>,
        from_bus_id: Id,
        to_bus_id: Id,
        max_flow_mw: f64,
        min_flow_mw: f64,
        resistance_pu: f64,
        reactance_pu: f64,
    ) -> Result<Self, InvalidField> {
        let id = Id::new("Line", id)?;
        if min_flow_mw > max_flow_mw {
            return Err(InvalidField::new("Line", "min_flow_MW", min_flow_mw, "must be <= max_flow_MW"));
        }
        Ok(Self {
            id,
            from_bus_id,
            to_bus_id,
            max_flow_mw,
            min_flow_mw,
            resistance_pu,
            reactance_pu,
        })
    }
}

/// Submarket-to-submarket transfer capacity. The workhorse of §4.3.5/§4.3.6: every
/// interconnection contributes one signed flow variable shared by exactly two energy-balance
/// constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interconnection {
    pub id: Id,
    pub from_submarket_id: Id,
    pub to_submarket_id: Id,
    pub capacity_mw: f64,
    pub loss_percent: f64,
}

impl Interconnection {
    pub fn new(
        id: impl Into<String>,
        from_submarket_id: Id,
        to_submarket_id: Id,
        capacity_mw: f64,
        loss_percent: f64,
    ) -> Result<Self, InvalidField> {
        let id = Id::new("Interconnection", id)?;
        require_positive("Interconnection", "capacity_MW", capacity_mw)?;
        super::validate::require_half_open_percent("Interconnection", "loss_percent", loss_percent)?;
        if from_submarket_id == to_submarket_id {
            return Err(InvalidField::new(
                "Interconnection",
                "to_submarket_id",
                &to_submarket_id,
                "must differ from from_submarket_id",
            ));
        }
        Ok(Self {
            id,
            from_submarket_id,
            to_submarket_id,
            capacity_mw,
            loss_percent,
        })
    }

    /// Fraction of sent energy lost at the receiving boundary, per §4.3.5 / §9.
    pub fn loss_fraction(&self) -> f64 {
        self.loss_percent / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interconnection_rejects_self_loop() {
        let a = Id::new("Submarket", "SE").unwrap();
        assert!(Interconnection::new("IC1", a.clone(), a, 1000.0, 2.0).is_err());
    }

    #[test]
    fn loss_fraction_converts_percent() {
        let ic = Interconnection::new(
            "IC1",
            Id::new("Submarket", "SE").unwrap(),
            Id::new("Submarket", "S").unwrap(),
            1000.0,
            10.0,
        )
        .unwrap();
        assert!((ic.loss_fraction() - 0.10).abs() < 1e-12);
    }
}
