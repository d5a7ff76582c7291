//! Application configuration.
//!
//! A small TOML file in the platform config directory overrides the
//! default file names the shell uses. Absence of the file is not an error;
//! defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File-name defaults for the shell's load/save/read commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default snapshot file for `save` and `load`
    pub snapshot_file: String,
    /// Default Garmin export file for `read`
    pub activity_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_file: "fitlog.snapshot".to_string(),
            activity_file: "Activities.csv".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// The configuration file path, when a platform config directory exists.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "fitlog", "fitlog")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let display = path.display().to_string();
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// Write configuration to the platform config directory. A platform
/// without one makes this a no-op.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let Some(path) = config_path() else {
        return Ok(());
    };
    write_config(config, &path)
}

fn write_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;

    let io_err = |source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)
}
