// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and
//! saving the coordination tunables to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use workshop_core::config::{self, Config};
//!
//! // Load existing configuration (defaults if none exists)
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.max_visible_toasts = Some(6);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod defaults;

pub use defaults::{
    DEFAULT_BUSY_MESSAGE, DEFAULT_MAX_VISIBLE_TOASTS, DEFAULT_OVERFLOW_HISTORY_CAP,
    DEFAULT_SAFETY_TIMEOUT_MS, DEFAULT_TOAST_DURATION_MS, DEFAULT_TOAST_EXIT_GRACE_MS,
    MIN_SAFETY_TIMEOUT_MS,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Workshop";

/// User-tunable settings for the coordination core.
///
/// Absent fields fall back to the constants in [`defaults`]; resolved
/// values are available through the accessor methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub safety_timeout_ms: Option<u64>,
    #[serde(default)]
    pub max_visible_toasts: Option<usize>,
    #[serde(default)]
    pub toast_duration_ms: Option<u64>,
    #[serde(default)]
    pub toast_exit_grace_ms: Option<u64>,
    #[serde(default)]
    pub overflow_history_cap: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            safety_timeout_ms: Some(DEFAULT_SAFETY_TIMEOUT_MS),
            max_visible_toasts: Some(DEFAULT_MAX_VISIBLE_TOASTS),
            toast_duration_ms: Some(DEFAULT_TOAST_DURATION_MS),
            toast_exit_grace_ms: Some(DEFAULT_TOAST_EXIT_GRACE_MS),
            overflow_history_cap: Some(DEFAULT_OVERFLOW_HISTORY_CAP),
        }
    }
}

impl Config {
    /// Resolved safety timeout, clamped to the supported minimum.
    #[must_use]
    pub fn safety_timeout(&self) -> Duration {
        let ms = self
            .safety_timeout_ms
            .unwrap_or(DEFAULT_SAFETY_TIMEOUT_MS)
            .max(MIN_SAFETY_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    /// Resolved visible-toast cap (at least 1).
    #[must_use]
    pub fn max_visible_toasts(&self) -> usize {
        self.max_visible_toasts
            .unwrap_or(DEFAULT_MAX_VISIBLE_TOASTS)
            .max(1)
    }

    /// Resolved default toast auto-dismiss duration.
    #[must_use]
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS))
    }

    /// Resolved exit-transition grace period.
    #[must_use]
    pub fn toast_exit_grace(&self) -> Duration {
        Duration::from_millis(
            self.toast_exit_grace_ms
                .unwrap_or(DEFAULT_TOAST_EXIT_GRACE_MS),
        )
    }

    /// Resolved overflow-history capacity (at least 1).
    #[must_use]
    pub fn overflow_history_cap(&self) -> usize {
        self.overflow_history_cap
            .unwrap_or(DEFAULT_OVERFLOW_HISTORY_CAP)
            .max(1)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_values() {
        let config = Config {
            safety_timeout_ms: Some(5_000),
            max_visible_toasts: Some(2),
            toast_duration_ms: Some(1_500),
            toast_exit_grace_ms: Some(200),
            overflow_history_cap: Some(5),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.safety_timeout_ms, config.safety_timeout_ms);
        assert_eq!(loaded.max_visible_toasts, config.max_visible_toasts);
        assert_eq!(loaded.toast_duration_ms, config.toast_duration_ms);
        assert_eq!(loaded.toast_exit_grace_ms, config.toast_exit_grace_ms);
        assert_eq!(loaded.overflow_history_cap, config.overflow_history_cap);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = [valid").expect("failed to write file");

        let loaded = load_from_path(&config_path).expect("load should not fail");
        assert_eq!(loaded.safety_timeout_ms, Some(DEFAULT_SAFETY_TIMEOUT_MS));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "max_visible_toasts = 7\n").expect("failed to write file");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.max_visible_toasts(), 7);
        assert_eq!(
            loaded.toast_duration(),
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS)
        );
    }

    #[test]
    fn safety_timeout_is_clamped_to_minimum() {
        let config = Config {
            safety_timeout_ms: Some(10),
            ..Config::default()
        };
        assert_eq!(
            config.safety_timeout(),
            Duration::from_millis(MIN_SAFETY_TIMEOUT_MS)
        );
    }

    #[test]
    fn max_visible_toasts_is_at_least_one() {
        let config = Config {
            max_visible_toasts: Some(0),
            ..Config::default()
        };
        assert_eq!(config.max_visible_toasts(), 1);
    }
}
