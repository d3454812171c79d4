//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! retro-clock.toml file. It covers the host-side settings of the desktop
//! runner: hour style, where the face persists its preference, and the
//! default log filter.
//!
//! The date-order preference itself is *not* configured here. It belongs to
//! the face and lives in the settings store, changed only by companion-app
//! messages.

use crate::format::HourMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "retro-clock.toml";

/// Application configuration loaded from retro-clock.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Display options
    pub display: DisplayConfig,
    /// Settings store location
    pub storage: StorageConfig,
    /// Logging options
    pub logging: LoggingConfig,
}

/// Display configuration
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// "24h" or "12h"
    pub clock_style: HourMode,
}

/// Persistent settings location
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// TOML file holding the face's persisted settings
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("retro-clock-settings.toml"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid config file format, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "Configuration saved");
        Ok(())
    }
}
