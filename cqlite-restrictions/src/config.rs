//! Configuration management for CQLite restrictions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure for restriction evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Key construction settings
    #[serde(default)]
    pub keys: KeyConfig,
}

impl Config {
    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("Invalid JSON configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        self.keys.validate()
    }
}

/// Settings used when turning column values into key elements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Reject encoded values whose width does not match a fixed-size type
    pub validate_values: bool,

    /// Accept zero-length values for fixed-size types (they sort first)
    pub allow_empty_values: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            validate_values: true,
            allow_empty_values: false,
        }
    }
}

impl KeyConfig {
    fn validate(&self) -> Result<()> {
        if self.allow_empty_values && !self.validate_values {
            return Err(Error::configuration(
                "allow_empty_values has no effect when validate_values is disabled",
            ));
        }
        Ok(())
    }
}
