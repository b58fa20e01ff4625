pub mod cli;
pub mod constants;
pub mod constraint_config;
pub mod solver_options;

pub use cli::Args;
pub use constraint_config::{ConstraintConfig, HydroBalanceConfig, RenewableConfig, ThermalUcConfig};
pub use solver_options::{SolverOptions, SolverSelection};
