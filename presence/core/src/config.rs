//! TOML Settings File Support
//!
//! Persists [`Settings`] to `$XDG_CONFIG_HOME/presence-indicators/settings.toml`
//! using the same camelCase keys the host stores.
//!
//! # Example
//!
//! ```toml
//! sizeMembersListInd = 20
//! sizeDMsInd = 20
//! avatarStatus = false
//! chatStatusPlatforms = true
//! radialStatusDMs = false
//! colorOnline = "#43b581"
//! colorDND = -1155800
//! ```
//!
//! A missing file is not an error; defaults are used. Unknown keys are logged
//! and ignored so that files written by newer versions still load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{SettingKey, Settings};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file
    #[error("Failed to read settings file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to write the settings file
    #[error("Failed to write settings file at {path}: {source}")]
    WriteError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML settings: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Invalid settings value
    #[error("Invalid settings: {0}")]
    ValidationError(String),
}

// =============================================================================
// Source Tracking
// =============================================================================

/// Where the loaded settings came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Settings file
    File,
    /// Built-in defaults
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Settings together with where they were loaded from
#[derive(Clone, Debug)]
pub struct LoadedSettings {
    /// The settings
    pub settings: Settings,
    /// Path of the file that was read, if any
    pub path: Option<PathBuf>,
    /// Source of the values
    pub source: ConfigSource,
}

impl Default for LoadedSettings {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            path: None,
            source: ConfigSource::Default,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Default settings file path
///
/// Returns `$XDG_CONFIG_HOME/presence-indicators/settings.toml` or
/// `~/.config/presence-indicators/settings.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("presence-indicators").join("settings.toml"))
}

/// Load settings from the default path
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load_settings() -> Result<LoadedSettings, ConfigError> {
    load_settings_from_path(default_settings_path())
}

/// Load settings from a specific path
///
/// `None` yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load_settings_from_path(path: Option<PathBuf>) -> Result<LoadedSettings, ConfigError> {
    let Some(config_path) = path else {
        return Ok(LoadedSettings::default());
    };

    if !config_path.exists() {
        tracing::debug!(
            path = %config_path.display(),
            "Settings file not found, using defaults"
        );
        return Ok(LoadedSettings::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let settings = parse_settings(&content)?;

    tracing::info!(
        path = %config_path.display(),
        "Loaded settings from file"
    );

    Ok(LoadedSettings {
        settings,
        path: Some(config_path),
        source: ConfigSource::File,
    })
}

/// Parse and validate a settings document
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] for malformed TOML or wrongly typed
/// values, and [`ConfigError::ValidationError`] for out-of-range sizes.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;

    for key in table.keys() {
        if SettingKey::parse(key).is_none() {
            tracing::warn!(key = %key, "Ignoring unknown setting");
        }
    }

    let settings: Settings = toml::Value::Table(table).try_into()?;
    settings
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    Ok(settings)
}

/// Write settings to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_settings_to_path(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(settings)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "Saved settings");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
