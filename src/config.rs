//! Runtime configuration
//!
//! Resolution order, last wins: built-in defaults, an optional YAML file,
//! the `KEYCODING_LANGDATA_DIR` environment variable, then explicit
//! overrides from the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the content directory
pub const LANGDATA_DIR_ENV: &str = "KEYCODING_LANGDATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Settings shared by the binary and embedders
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `<slug>.json` per language
    pub langdata_dir: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            langdata_dir: default_langdata_dir(),
            log_filter: "keycoding=info".to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os(LANGDATA_DIR_ENV).filter(|d| !d.is_empty()) {
            config.langdata_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Parse a YAML config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes as unit, not as a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn with_langdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.langdata_dir = dir.into();
        self
    }
}

/// `<data dir>/keycoding/langdata`, e.g. `~/.local/share/keycoding/langdata`
pub fn default_langdata_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("keycoding").join("langdata")
}
