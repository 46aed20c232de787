//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock clinic setup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::IdStrategy;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Specialty suggestions offered when registering a doctor.
pub const DEFAULT_SPECIALTIES: [&str; 7] = [
    "Dermatologia Estética",
    "Cirurgia Plástica",
    "Medicina Estética",
    "Harmonização Facial",
    "Laser e Luz Pulsada",
    "Tricologia",
    "Nutrição Estética",
];

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdminConfig {
    /// How new record ids are generated
    pub id_strategy: IdStrategy,
    /// Load the demo doctors/patients/appointment on startup
    pub seed_demo_data: bool,
    /// Appointments listed under "recent" on the dashboard
    pub recent_limit: usize,
    /// Appointments per day considered full occupancy
    pub daily_capacity: u32,
    /// Specialty suggestions for the doctor form
    pub specialties: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Sequential,
            seed_demo_data: true,
            recent_limit: 5,
            daily_capacity: 10,
            specialties: DEFAULT_SPECIALTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AdminConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: AdminConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Reject values that would make derived views meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.daily_capacity == 0 {
            return Err(ConfigError::Invalid("daily_capacity must be positive".into()));
        }
        if self.specialties.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid("specialties must not be blank".into()));
        }
        Ok(())
    }
}
