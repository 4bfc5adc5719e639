//! Configuration for the notifier binary.
//!
//! A small TOML file in the platform config directory; every field has a
//! default so the binary runs with no file at all. The grid window and
//! slot size are build-time constants and deliberately not configurable
//! here.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Explicit database file; defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// How often to scan for due reminders.
    pub poll_interval_secs: u64,
    /// Grace period before the first scan after startup.
    pub startup_delay_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            poll_interval_secs: 60,
            startup_delay_secs: 5,
        }
    }
}

impl NotifierConfig {
    /// Load the config file if one exists, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Ignoring malformed config at {:?}: {}", path, err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Location of the notifier config file.
    pub fn config_file_path() -> Option<PathBuf> {
        let base = directories::BaseDirs::new()?;
        Some(base.config_dir().join("unitask").join("notifier.toml"))
    }

    /// The database file to open, creating its parent directory if needed.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let base = directories::BaseDirs::new().context("Failed to get base directories")?;
        let data_dir = base.data_dir().join("unitask");

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        }

        Ok(data_dir.join("unitask.db"))
    }
}
