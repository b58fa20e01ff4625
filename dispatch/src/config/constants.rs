//! Domain constants used across the variable manager, constraint builders and objective (§10.3).

/// `hm3 * s / (m3 * h)`: converts an `m3/s` flow held for one hour into `hm3` of volume (§4.3.2).
/// Scale by `period_duration_hours` for periods other than one hour.
pub const ALPHA_HM3_PER_M3S_HOUR: f64 = 0.0036;

/// Default round-trip pumping efficiency applied only at `HydroPlant` construction when the
/// loader omits an explicit value (§9).
pub const DEFAULT_PUMP_EFFICIENCY: f64 = crate::entities::DEFAULT_PUMP_EFFICIENCY;

/// Default deficit (unserved energy) penalty, `Rs/MWh`, large enough to dominate normal
/// operation (§4.4).
pub const DEFAULT_DEFICIT_PENALTY_RS_PER_MWH: f64 = 10_000.0;

/// Default curtailment penalty, `Rs/MWh`. Kept well below the deficit penalty so the solver
/// always prefers curtailing renewables over shedding load, but still above zero so curtailment
/// is not free.
pub const DEFAULT_CURTAILMENT_PENALTY_RS_PER_MWH: f64 = 50.0;

/// Default MIP gap tolerance passed to the solver when `SolverOptions` does not override it.
pub const DEFAULT_MIP_GAP: f64 = 1e-4;

/// Default wall-clock solve budget in seconds.
pub const DEFAULT_TIME_LIMIT_S: f64 = 300.0;
