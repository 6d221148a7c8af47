// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[video]` - Initial volume, mute, autoplay and keyboard seek step
//! - `[controls]` - Auto-hide delay of the control overlay
//! - `[diagnostics]` - In-memory event buffer size
//!
//! # Path Resolution
//!
//! 1. Explicit directory passed to `load_with_override()`/`save_with_override()`
//! 2. `UNIVIEW_CONFIG_DIR` environment variable
//! 3. Platform config directory (`dirs::config_dir()/UniView`)
//!
//! # Examples
//!
//! ```no_run
//! use uniview::config;
//!
//! let (mut config, _warning) = config::load();
//! config.video.autoplay = Some(false);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::ui::ControlsTimeout;
use crate::domain::video::{KeyboardSeekStep, Volume};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "UniView";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "UNIVIEW_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Video playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoConfig {
    /// Initial playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Whether audio starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Start playback as soon as a file is bound.
    #[serde(default = "default_autoplay", skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Keyboard seek step in seconds (arrow keys).
    #[serde(
        default = "default_keyboard_seek_step_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyboard_seek_step_secs: Option<f64>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: Some(false),
            autoplay: default_autoplay(),
            keyboard_seek_step_secs: default_keyboard_seek_step_secs(),
        }
    }
}

/// Control overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Idle time before the overlay hides during playback (ms).
    #[serde(
        default = "default_hide_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_delay_ms: Option<u64>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: default_hide_delay_ms(),
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory.
    #[serde(
        default = "default_buffer_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Player configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub video: VideoConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Resolves the optional fields into validated player settings.
    ///
    /// Out-of-range values are clamped by the domain newtypes.
    #[must_use]
    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            volume: Volume::new(self.video.volume.unwrap_or(DEFAULT_VOLUME)),
            muted: self.video.muted.unwrap_or(false),
            autoplay: self.video.autoplay.unwrap_or(true),
            keyboard_seek_step: self
                .video
                .keyboard_seek_step_secs
                .map(KeyboardSeekStep::new)
                .unwrap_or_default(),
            controls_timeout: self
                .controls
                .hide_delay_ms
                .map(ControlsTimeout::new)
                .unwrap_or_default(),
        }
    }

    /// Size of the diagnostics ring buffer, clamped to the allowed range.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        self.diagnostics
            .buffer_capacity
            .map(BufferCapacity::new)
            .unwrap_or_default()
    }
}

/// Validated settings consumed by a player session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub volume: Volume,
    pub muted: bool,
    pub autoplay: bool,
    pub keyboard_seek_step: KeyboardSeekStep,
    pub controls_timeout: ControlsTimeout,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: Volume::default(),
            muted: false,
            autoplay: true,
            keyboard_seek_step: KeyboardSeekStep::default(),
            controls_timeout: ControlsTimeout::default(),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_volume() -> Option<f64> {
    Some(DEFAULT_VOLUME)
}

fn default_autoplay() -> Option<bool> {
    Some(true)
}

fn default_keyboard_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_KEYBOARD_SEEK_STEP_SECS)
}

fn default_hide_delay_ms() -> Option<u64> {
    Some(DEFAULT_CONTROLS_HIDE_DELAY_MS)
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honouring an explicit override first.
fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("settings could not be loaded, using defaults: {err}")),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
