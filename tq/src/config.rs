//! Configuration for tq.
//!
//! Config file resolution order:
//! 1. Explicit path passed with `--config`
//! 2. TQ_CONFIG environment variable
//! 3. Default: `<platform config dir>/tq/config.toml`, if it exists
//! 4. Built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_ENV_VAR: &str = "TQ_CONFIG";

/// How parsed paths are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Normalized path, e.g. PID-3(1)
    #[default]
    Canonical,
    /// Query descriptor plus resolved values and flags
    Json,
    /// One row per level
    Table,
}

/// tq configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output format used by `tq parse` when `--format` is not given.
    #[serde(default)]
    pub format: Format,

    /// Where this config was loaded from.
    #[serde(skip)]
    pub source: ConfigSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    #[default]
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "built-in defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// Load config using the default resolution order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load_from(Path::new(&path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.source = ConfigSource::File(path.to_path_buf());
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// `<platform config dir>/tq/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tq").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format, Format::Canonical);
        assert_eq!(config.source, ConfigSource::Defaults);
    }

    #[test]
    fn test_parse_format() {
        let config: Config = toml::from_str("format = \"table\"").unwrap();
        assert_eq!(config.format, Format::Table);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.format, Format::Canonical);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(toml::from_str::<Config>("format = \"xml\"").is_err());
    }

    #[test]
    fn test_to_toml() {
        let config = Config {
            format: Format::Json,
            ..Default::default()
        };
        assert_eq!(config.to_toml().unwrap().trim(), "format = \"json\"");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load_from(Path::new("/nonexistent/tq/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
