//! Systems - advance, branch and evaluate a life

pub mod aging;
pub mod events;
pub mod inheritance;
pub mod scoring;

pub use aging::{advance, YearReport};
pub use events::{EventEngine, EventKind, EventRecord, EventTable};
pub use inheritance::{inherit, next_generation};
pub use scoring::{evaluate, life_score, Evaluation, Tier};
