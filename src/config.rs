//! Configuration loading.
//!
//! `config.json` lives under the platform config dir. A missing default
//! file means defaults; an explicit path that can't be read, or a file
//! that doesn't parse, is an error.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::ShellConfig;

const CONFIG_FILENAME: &str = "config.json";
const LOG_FILENAME: &str = "gitix.log";

/// Error while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Could not read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Invalid config {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Default config file location, e.g. `~/.config/gitix/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gitix").join(CONFIG_FILENAME))
}

/// Default log file location, e.g. `~/.local/share/gitix/gitix.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gitix")
        .join(LOG_FILENAME)
}

/// Parse a config file.
pub fn load_config(path: &Path) -> Result<ShellConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the explicit config if given, else the default file if it exists,
/// else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ShellConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config(&path),
            _ => Ok(ShellConfig::default()),
        },
    }
}
