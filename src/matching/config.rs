use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::rolling_hash::RollingHashParams;

/// Default cap on text or pattern length, in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 10_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the match engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rabin-Karp hash parameters
    pub rolling_hash: RollingHashParams,
    /// Maximum characters accepted for either the text or the pattern
    pub max_input_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rolling_hash: RollingHashParams::default(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, `ConfigError::Parse`
    /// on malformed JSON, or `ConfigError::Invalid` if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed JSON, or `ConfigError::Invalid`
    /// if a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rolling_hash.validate().map_err(ConfigError::Invalid)?;
        if self.max_input_chars == 0 {
            return Err(ConfigError::Invalid(
                "max_input_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
