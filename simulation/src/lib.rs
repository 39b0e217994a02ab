//! Lifesim Simulation Engine
//!
//! Turn-based life simulation across generations. One character ages a year
//! per tick, draws a random event, retires at 65 and eventually dies; its
//! heir inherits perturbed talents and a share of the wealth.

pub mod commentary;
pub mod components;
pub mod config;
pub mod error;
pub mod names;
pub mod persistence;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::SimConfig;
pub use error::{AllocationError, ConfigError, EventTableError, LoadError, SaveError};
pub use persistence::ExportData;
pub use systems::{Evaluation, EventEngine, EventKind, Tier, YearReport};
pub use world::{SimulationWorld, WorldIndices};
