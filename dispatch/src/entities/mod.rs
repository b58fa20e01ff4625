//! Entity model: the plain-data types the rest of the crate builds variables and constraints
//! over (§3.1). Every entity validates its own invariants at construction; cross-reference
//! checks that need the whole collection live on `System` (`crate::system`).

pub mod bus;
pub mod error;
pub mod hydro;
pub mod ids;
pub mod load;
pub mod renewable;
pub mod submarket;
pub mod thermal;
pub mod validate;

pub use bus::{Bus, Interconnection, Line};
pub use error::{InvalidField, InvalidSystem};
pub use hydro::{HydroKind, HydroKindTag, HydroPlant, DEFAULT_PUMP_EFFICIENCY};
pub use ids::Id;
pub use load::Load;
pub use renewable::{RenewableKind, RenewablePlant};
pub use submarket::Submarket;
pub use thermal::{FuelType, ThermalKind, ThermalPlant};
