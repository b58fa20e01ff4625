//! Data ingestion: out-of-core concerns the core dispatch model never touches directly (§1
//! Non-goals exclude data ingestion from the core, §11.2 supplements it as a reference loader).

pub mod fixtures;
pub mod inflow;

pub use fixtures::{load_system, FixtureError};
pub use inflow::{InflowProvider, TableInflowProvider};
