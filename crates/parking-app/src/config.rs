//! Configuration management for parking-lot
//!
//! Config stored at: ~/.config/parking-lot/config.json

use parking_types::{ConfigError, OutputFormat, Result, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User preferences applied at the start of each session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Charge per hour used when a session starts
    #[serde(default)]
    pub hourly_rate: f64,

    /// Number of parking spaces used when a session starts
    #[serde(default)]
    pub total_spaces: u32,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Symbol printed in front of charges
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hourly_rate: 0.0,
            total_spaces: 0,
            output_format: default_output_format(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("parking-lot");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(ConfigError::ParseError(format!(
                "hourly_rate must be a non-negative number, got {}",
                self.hourly_rate
            ))
            .into());
        }
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parking Lot Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Hourly rate:    {}", self.hourly_rate)?;
        writeln!(f, "Total spaces:   {}", self.total_spaces)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Currency:       {}", self.currency_symbol)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            hourly_rate: 12.5,
            total_spaces: 20,
            output_format: OutputFormat::Json,
            currency_symbol: "$".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"total_spaces": 8}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.total_spaces, 8);
        assert_eq!(config.hourly_rate, 0.0);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"hourly_rate": -3}"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
