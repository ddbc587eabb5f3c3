//! Application configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. Lookup order for [`AppConfig::load`]:
//! 1. an explicit path (must exist)
//! 2. `./tradeidea.toml`
//! 3. `<config_dir>/tradeidea/config.toml`
//! 4. built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{check_date_format, DEFAULT_DATE_FORMAT};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tradeidea.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub records: RecordsConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Where the order and client tables live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub dir: PathBuf,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("data") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format string for calendar dates.
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { date_format: DEFAULT_DATE_FORMAT.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// `compact`, `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "compact".to_string() }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration file and load it, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Implicit lookup locations, in priority order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tradeidea").join("config.toml"));
        }
        paths
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_date_format(&self.display.date_format)
            .map_err(|e| ConfigError::Invalid(format!("display.date_format: {e}")))?;
        if !matches!(self.logging.format.as_str(), "compact" | "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be compact, pretty or json, got '{}'",
                self.logging.format
            )));
        }
        if self.records.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("records.dir must not be empty".into()));
        }
        Ok(())
    }
}
