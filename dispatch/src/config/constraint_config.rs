use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_CURTAILMENT_PENALTY_RS_PER_MWH, DEFAULT_DEFICIT_PENALTY_RS_PER_MWH};

/// Options recognized by the thermal unit-commitment builder (§4.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalUcConfig {
    pub enable_ramping: bool,
    pub enable_min_up_down_time: bool,
}

impl Default for ThermalUcConfig {
    fn default() -> Self {
        Self {
            enable_ramping: true,
            enable_min_up_down_time: true,
        }
    }
}

/// Options recognized by the hydro water-balance builder (§4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydroBalanceConfig {
    pub include_spill: bool,
    pub include_pumping: bool,
}

impl Default for HydroBalanceConfig {
    fn default() -> Self {
        Self {
            include_spill: true,
            include_pumping: true,
        }
    }
}

/// Options recognized by the renewable envelope builder (§4.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenewableConfig {
    pub allow_curtailment_override: bool,
}

impl Default for RenewableConfig {
    fn default() -> Self {
        Self {
            allow_curtailment_override: false,
        }
    }
}

/// Top-level configuration for which variable families and constraint builders are enabled, and
/// each builder's own options and objective penalty coefficients (§9 "Config as explicit
/// structs"; no dynamic string-keyed option bags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    pub enable_thermal_uc: bool,
    pub enable_hydro_balance: bool,
    pub enable_hydro_production: bool,
    pub enable_renewable_envelope: bool,
    pub enable_submarket_balance: bool,
    pub enable_interconnection_envelope: bool,
    pub enable_deficit: bool,
    pub thermal_uc: ThermalUcConfig,
    pub hydro_balance: HydroBalanceConfig,
    pub renewable: RenewableConfig,
    pub deficit_penalty_rs_per_mwh: f64,
    pub curtailment_penalty_rs_per_mwh: f64,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            enable_thermal_uc: true,
            enable_hydro_balance: true,
            enable_hydro_production: true,
            enable_renewable_envelope: true,
            enable_submarket_balance: true,
            enable_interconnection_envelope: true,
            enable_deficit: true,
            thermal_uc: ThermalUcConfig::default(),
            hydro_balance: HydroBalanceConfig::default(),
            renewable: RenewableConfig::default(),
            deficit_penalty_rs_per_mwh: DEFAULT_DEFICIT_PENALTY_RS_PER_MWH,
            curtailment_penalty_rs_per_mwh: DEFAULT_CURTAILMENT_PENALTY_RS_PER_MWH,
        }
    }
}
