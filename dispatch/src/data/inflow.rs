use crate::entities::Id;

/// Supplies natural inflow (`m3/s`) per hydro plant and period to the water-balance builder
/// (§4.3.2). Every hydro plant's inflow is wired through this trait; there is no silent
/// hard-coded zero for a plant the provider actually has data for (§9 decision record).
pub trait InflowProvider: Sync {
    /// Returns `None` when the provider has no data for `(plant_id, period)`. The caller treats a
    /// miss as zero inflow and emits a warning - the distinction between "provider says zero" and
    /// "provider has no entry" is preserved here precisely so that warning can be raised.
    fn hourly_m3s(&self, plant_id: &Id, period: usize) -> Option<f64>;
}

/// An `InflowProvider` backed by a dense per-plant series, as produced by the CSV loader
/// (§11.2). Missing plants or out-of-range periods fall through to `None`.
#[derive(Debug, Clone, Default)]
pub struct TableInflowProvider {
    series: std::collections::HashMap<String, Vec<f64>>,
}

impl TableInflowProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, plant_id: impl Into<String>, series: Vec<f64>) {
        self.series.insert(plant_id.into(), series);
    }
}

impl InflowProvider for TableInflowProvider {
    fn hourly_m3s(&self, plant_id: &Id, period: usize) -> Option<f64> {
        self.series.get(plant_id.as_str())?.get(period).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_plant_reports_none_not_zero() {
        let provider = TableInflowProvider::new();
        let id = Id::new("HydroPlant", "H1").unwrap();
        assert_eq!(provider.hourly_m3s(&id, 0), None);
    }

    #[test]
    fn known_plant_returns_its_series_value() {
        let mut provider = TableInflowProvider::new();
        provider.insert("H1", vec![100.0, 120.0]);
        let id = Id::new("HydroPlant", "H1").unwrap();
        assert_eq!(provider.hourly_m3s(&id, 1), Some(120.0));
        assert_eq!(provider.hourly_m3s(&id, 5), None);
    }
}
