//! Configuration management for the CLI

use anyhow::{Context, Result};
use cost_optimizer::ThresholdConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persisted CLI defaults, layered under command-line flags
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default output format ("table" or "json")
    pub default_format: Option<String>,
    /// Threshold overrides applied before command-line flags
    pub thresholds: Option<ThresholdConfig>,
}

impl Config {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("cco").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_parses() {
        let config: Config =
            serde_json::from_str(r#"{"thresholds": {"idle_cpu_pct": 8.0}}"#).unwrap();

        assert!(config.default_format.is_none());
        let thresholds = config.thresholds.unwrap();
        assert_eq!(thresholds.idle_cpu_pct, 8.0);
        // unspecified fields fall back to library defaults
        assert_eq!(thresholds.underutil_cpu_pct, 20.0);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.thresholds.is_none());
    }
}
