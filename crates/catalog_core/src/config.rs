//! Catalog runtime configuration.
//!
//! # Responsibility
//! - Load optional TOML settings for storage location and logging.
//! - Reject settings that `init_logging` or `open_db` would refuse later.
//!
//! # Invariants
//! - Every field is optional; an empty file yields `CatalogConfig::default()`.
//! - `db_path = None` selects an in-memory database.

use crate::logging::{default_log_level, parse_level};
use log::LevelFilter;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings consumed by the catalog CLI.
///
/// ```toml
/// db_path = "/var/lib/catalog/catalog.sqlite3"
/// log_level = "info"
/// log_dir = "/var/log/catalog"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl CatalogConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks level names and that `log_dir` is absolute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            parse_level(level).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Configured level, or the build-mode default.
    pub fn effective_log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|raw| parse_level(raw).ok())
            .unwrap_or_else(default_log_level)
    }
}
