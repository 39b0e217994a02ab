//! Simulation configuration
//!
//! Passed explicitly to the world and the driver. Every field has a default,
//! so a config file only needs the values it wants to change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::components::TalentPools;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed seed for reproducible runs; random when absent
    pub seed: Option<u64>,
    /// Directory holding `life_save_{slot}.dat` files
    pub save_dir: PathBuf,
    pub autosave: bool,
    pub autosave_interval_years: u32,
    /// Slot to resume from; a fresh character is created if loading fails
    pub resume_slot: Option<u32>,
    pub show_age_commentary: bool,
    pub show_detailed_events: bool,
    /// Lineage members the driver plays through
    pub generations: u32,
    pub pools: TalentPools,
    pub log_level: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            save_dir: PathBuf::from("."),
            autosave: false,
            autosave_interval_years: 5,
            resume_slot: None,
            show_age_commentary: true,
            show_detailed_events: true,
            generations: 1,
            pools: TalentPools::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autosave && self.autosave_interval_years == 0 {
            return Err(ConfigError::Invalid(
                "autosave_interval_years must be positive".to_string(),
            ));
        }
        if self.pools.base < 3 || self.pools.skill < 0 {
            return Err(ConfigError::Invalid(format!(
                "talent pools too small: base {}, skill {}",
                self.pools.base, self.pools.skill
            )));
        }
        if self.generations == 0 {
            return Err(ConfigError::Invalid("generations must be at least 1".to_string()));
        }
        self.tracing_level()?;
        Ok(())
    }

    pub fn tracing_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }

    /// Whether the world should save after reaching `age`
    pub fn autosave_due(&self, age: u32) -> bool {
        self.autosave && self.autosave_interval_years > 0 && age % self.autosave_interval_years == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pools, TalentPools { base: 25, skill: 20 });
        assert_eq!(config.tracing_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_partial_json() {
        let config = SimConfig::from_json(r#"{ "seed": 9, "generations": 3 }"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.generations, 3);
        assert!(!config.autosave);
        assert_eq!(config.autosave_interval_years, 5);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "log_level": "loud" }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "generations": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_autosave_due() {
        let mut config = SimConfig::default();
        assert!(!config.autosave_due(10));
        config.autosave = true;
        assert!(config.autosave_due(10));
        assert!(!config.autosave_due(11));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifesim.json");
        fs::write(&path, r#"{ "autosave": true, "autosave_interval_years": 10 }"#).unwrap();
        let config = SimConfig::from_file(&path).unwrap();
        assert!(config.autosave_due(20));

        assert!(matches!(
            SimConfig::from_file(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
