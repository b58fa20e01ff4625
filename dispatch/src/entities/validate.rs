use super::error::InvalidField;

/// Shared numeric-rule helpers used by every entity constructor, so the rule text stays
/// consistent across `ThermalPlant`, `HydroPlant`, `RenewablePlant`, and `Load`.
pub fn require_non_negative(entity: &'static str, field: &'static str, value: f64) -> Result<(), InvalidField> {
    if value < 0.0 {
        return Err(InvalidField::new(entity, field, value, "must be >= 0"));
    }
    Ok(())
}

pub fn require_positive(entity: &'static str, field: &'static str, value: f64) -> Result<(), InvalidField> {
    if value <= 0.0 {
        return Err(InvalidField::new(entity, field, value, "must be > 0"));
    }
    Ok(())
}

pub fn require_ordered(
    entity: &'static str,
    lo_field: &'static str,
    lo: f64,
    hi_field: &'static str,
    hi: f64,
) -> Result<(), InvalidField> {
    if lo > hi {
        return Err(InvalidField::new(
            entity,
            lo_field,
            lo,
            format!("must be <= {hi_field} ({hi})"),
        ));
    }
    Ok(())
}

pub fn require_unit_interval_open_low(entity: &'static str, field: &'static str, value: f64) -> Result<(), InvalidField> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(InvalidField::new(entity, field, value, "must be in (0, 1]"));
    }
    Ok(())
}

pub fn require_half_open_percent(entity: &'static str, field: &'static str, value: f64) -> Result<(), InvalidField> {
    if !(0.0..100.0).contains(&value) {
        return Err(InvalidField::new(entity, field, value, "must be in [0, 100)"));
    }
    Ok(())
}

pub fn require_finite_non_negative_series(
    entity: &'static str,
    field: &'static str,
    values: &[f64],
    bound: Option<f64>,
) -> Result<(), InvalidField> {
    for (t, &value) in values.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidField::new(
                entity,
                field,
                format!("[{t}] = {value}"),
                "every period must be finite and >= 0",
            ));
        }
        if let Some(bound) = bound {
            if value > bound + 1e-9 {
                return Err(InvalidField::new(
                    entity,
                    field,
                    format!("[{t}] = {value}"),
                    format!("must be <= {bound}"),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_rejects_reversed_bounds() {
        assert!(require_ordered("ThermalPlant", "min_generation_MW", 50.0, "max_generation_MW", 10.0).is_err());
        assert!(require_ordered("ThermalPlant", "min_generation_MW", 10.0, "max_generation_MW", 50.0).is_ok());
    }

    #[test]
    fn series_bound_checked_per_period() {
        let series = vec![0.0, 50.0, 120.0];
        assert!(require_finite_non_negative_series("RenewablePlant", "capacity_forecast_MW", &series, Some(100.0)).is_err());
    }
}
