//! Hydrothermal dispatch core: entity model, variable manager, constraint builders, objective,
//! solver adapter, and solution extraction for a DESSEM-style daily/weekly unit-commitment and
//! economic-dispatch problem over Brazil's interconnected submarkets.

pub mod config;
pub mod entities;
pub mod system;
pub mod variables;
pub mod constraints;
pub mod objective;
pub mod solver;
pub mod data;
pub mod batch;
pub mod utils;

pub use entities::{InvalidField, InvalidSystem};
pub use system::{System, SystemInput};
