//! Simulation World - main orchestrator
//!
//! Owns the current lineage member, the background indices, the event engine
//! and the one RNG every system draws from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::components::{Character, Talents};
use crate::config::SimConfig;
use crate::error::{AllocationError, LoadError, SaveError};
use crate::persistence::{self, ExportData};
use crate::systems::{self, EventEngine, Evaluation, YearReport};

/// Slot the world writes to when autosaving
pub const AUTOSAVE_SLOT: u32 = 1;

/// Background economy and environment; drifts every year, read by nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldIndices {
    pub economic_index: i32,
    pub climate_factor: f64,
    pub stock_market: i32,
    pub city_development: i32,
}

impl Default for WorldIndices {
    fn default() -> Self {
        Self {
            economic_index: 100,
            climate_factor: 1.0,
            stock_market: 1000,
            city_development: 100,
        }
    }
}

impl WorldIndices {
    pub fn drift(&mut self, rng: &mut impl Rng) {
        self.economic_index += rng.gen_range(-3..=3);
        self.climate_factor += rng.gen_range(0.0..0.05);
        self.stock_market += rng.gen_range(-10..=10);
        self.city_development += rng.gen_range(-5..=5);
    }
}

pub struct SimulationWorld {
    pub config: SimConfig,
    pub character: Character,
    pub indices: WorldIndices,
    engine: EventEngine,
    rng: StdRng,
}

impl SimulationWorld {
    /// Start a lineage from a player allocation, checked against the configured pools
    pub fn new(config: SimConfig, talents: Talents) -> Result<Self, AllocationError> {
        talents.validate(&config.pools)?;
        let mut rng = seeded_rng(config.seed);
        let character = Character::new(talents, &mut rng);
        Ok(Self::assemble(config, character, rng))
    }

    /// Start a lineage from a random allocation of the configured pools
    pub fn with_random_character(config: SimConfig) -> Self {
        let mut rng = seeded_rng(config.seed);
        let talents = Talents::random_allocation(&mut rng, &config.pools);
        let character = Character::new(talents, &mut rng);
        Self::assemble(config, character, rng)
    }

    /// Continue from an existing character, typically one just loaded
    pub fn from_character(config: SimConfig, character: Character) -> Self {
        let rng = seeded_rng(config.seed);
        Self::assemble(config, character, rng)
    }

    fn assemble(config: SimConfig, character: Character, rng: StdRng) -> Self {
        info!(
            generation = character.generation,
            age = character.age,
            hereditary_disease = character.has_hereditary_disease,
            seed = ?config.seed,
            "simulation world ready"
        );
        Self {
            config,
            character,
            indices: WorldIndices::default(),
            engine: EventEngine::standard(),
            rng,
        }
    }

    /// Replace the event engine, e.g. with a custom table
    pub fn with_engine(mut self, engine: EventEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> &EventEngine {
        &self.engine
    }

    pub fn is_alive(&self) -> bool {
        self.character.is_alive()
    }

    /// Run one year: drift the indices, advance the character, autosave if due.
    /// A failed autosave is logged and the year still counts.
    pub fn tick(&mut self) -> YearReport {
        self.indices.drift(&mut self.rng);
        let report = systems::advance(&mut self.character, &self.engine, &mut self.rng);

        if self.config.autosave_due(report.age) {
            if let Err(e) = self.save_slot(AUTOSAVE_SLOT) {
                warn!(age = report.age, error = %e, "autosave failed");
            }
        }
        report
    }

    /// Tick until the character dies, then evaluate the life
    pub fn run_lifetime(&mut self) -> Evaluation {
        while self.is_alive() {
            self.tick();
        }
        let evaluation = systems::evaluate(&self.character);
        info!(
            generation = self.character.generation,
            age = self.character.age,
            score = evaluation.score,
            tier = evaluation.tier.label(),
            "life complete"
        );
        evaluation
    }

    /// Replace the character with its child. The parent is returned.
    pub fn next_generation(&mut self) -> Character {
        let child = systems::next_generation(&self.character, &mut self.rng);
        std::mem::replace(&mut self.character, child)
    }

    pub fn save_slot(&self, slot: u32) -> Result<(), SaveError> {
        persistence::save_slot(&self.config.save_dir, slot, &self.character)?;
        Ok(())
    }

    /// Load a slot over the current character; on error nothing changes
    pub fn load_slot(&mut self, slot: u32) -> Result<(), LoadError> {
        self.character = persistence::load_slot(&self.config.save_dir, slot)?;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, SaveError> {
        ExportData::new(self.indices.clone(), self.character.clone()).to_json()
    }

    /// Import a JSON export over the current state; on error nothing changes
    pub fn import_json(&mut self, json: &str) -> Result<(), LoadError> {
        let data = ExportData::from_json(json)?;
        self.indices = data.indices;
        self.character = data.character;
        Ok(())
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
