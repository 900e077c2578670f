//! Configuration handling for Ticket Query
//!
//! Configuration is stored in `~/.config/tq/config.toml` (platform config
//! directory). Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormatSetting {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: FormatSetting,

    /// Snapshot file used when `--snapshot` is not given
    pub snapshot: Option<PathBuf>,

    /// Status names in workflow order, used when the snapshot has no status catalog
    pub status_order: Vec<String>,

    /// Priority names, most urgent first, replacing the built-in ranking
    pub priority_order: Vec<String>,
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ticket-query", "tq").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects orderings that would rank one name twice
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, order) in [("status_order", &self.status_order), ("priority_order", &self.priority_order)] {
            let mut seen = std::collections::HashSet::new();
            for name in order {
                if name.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!("{} contains an empty name", key)));
                }
                if !seen.insert(name.to_lowercase()) {
                    return Err(ConfigError::Invalid(format!("{} lists '{}' twice", key, name)));
                }
            }
        }
        Ok(())
    }
}
