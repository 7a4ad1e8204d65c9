//! Optional TOML settings for the `salary-calc` binary.
//!
//! ```toml
//! [search]
//! precision = 2
//! max_iterations = 50
//!
//! [logging]
//! level = "info"
//! file = "salary-calc.log"
//! ```
//!
//! Every key is optional; missing keys keep their defaults. Command-line
//! flags take precedence over values read here.

use std::path::{Path, PathBuf};

use salary_core::calculations::{GrossForNetError, SearchConfig};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid search settings: {0}")]
    Search(#[from] GrossForNetError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub precision: u32,
    pub max_iterations: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let config = SearchConfig::default();
        Self {
            precision: config.precision,
            max_iterations: config.max_iterations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,

    /// Append log records to this file in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parses settings from TOML text and validates them.
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reads settings from `path` when given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.search_config().validate()?;
        Ok(())
    }

    /// Search configuration with optional command-line overrides applied.
    pub fn search_config_with(
        &self,
        precision: Option<u32>,
        max_iterations: Option<u32>,
    ) -> SearchConfig {
        SearchConfig {
            precision: precision.unwrap_or(self.search.precision),
            max_iterations: max_iterations.unwrap_or(self.search.max_iterations),
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        self.search_config_with(None, None)
    }
}
