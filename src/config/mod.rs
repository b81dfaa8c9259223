// SPDX-License-Identifier: MPL-2.0
//! This module loads user preferences from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - UI language
//! - `[playback]` - Initial playback flags, volume, rate and seek step
//! - `[controls]` - Controls overlay auto-hide threshold
//! - `[polling]` - Position polling period
//! - `[playlist]` - Tracks to play
//!
//! The file is read once at startup and never written: player state and
//! bookmarks only live for the session.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. Pass a directory to `load_with_override()` (the `--config-dir` flag)
//! 3. Set the `FRAMEMARK_CONFIG_DIR` environment variable
//! 4. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use framemark::config;
//!
//! // Returns defaults plus an optional warning key if the file is malformed
//! let (config, _warning) = config::load();
//! assert!(!config.tracks().is_empty());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default)]
    pub language: Option<String>,
}

/// Initial playback settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Start playing as soon as a track is loaded.
    #[serde(default = "default_autoplay")]
    pub autoplay: Option<bool>,

    /// Start muted.
    #[serde(default = "default_muted")]
    pub muted: Option<bool>,

    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume")]
    pub volume: Option<f32>,

    /// Playback rate; snapped to the nearest selectable rate.
    #[serde(default = "default_playback_rate")]
    pub playback_rate: Option<f64>,

    /// Rewind/fast-forward step in seconds.
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: Option<f64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            muted: default_muted(),
            volume: default_volume(),
            playback_rate: default_playback_rate(),
            seek_step_secs: default_seek_step_secs(),
        }
    }
}

/// Controls overlay settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Progress ticks without pointer movement before the controls hide.
    #[serde(default = "default_auto_hide_ticks")]
    pub auto_hide_ticks: Option<u32>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            auto_hide_ticks: default_auto_hide_ticks(),
        }
    }
}

/// Position polling settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PollingConfig {
    /// Polling period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Playlist settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct PlaylistConfig {
    /// Media URLs or local paths, in playback order.
    #[serde(default)]
    pub tracks: Vec<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub playlist: PlaylistConfig,
}

impl Config {
    /// Returns the configured tracks, or the built-in sample playlist when the
    /// `[playlist]` section is missing or empty.
    #[must_use]
    pub fn tracks(&self) -> Vec<String> {
        if self.playlist.tracks.is_empty() {
            DEFAULT_TRACKS.iter().map(|s| (*s).to_string()).collect()
        } else {
            self.playlist.tracks.clone()
        }
    }

    /// Returns the polling period, clamped to the supported range.
    #[must_use]
    pub fn poll_interval(&self) -> std::time::Duration {
        let ms = self
            .polling
            .interval_ms
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
            .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);
        std::time::Duration::from_millis(ms)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_autoplay() -> Option<bool> {
    Some(DEFAULT_AUTOPLAY)
}

fn default_muted() -> Option<bool> {
    Some(DEFAULT_MUTED)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_playback_rate() -> Option<f64> {
    Some(DEFAULT_PLAYBACK_RATE)
}

fn default_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_SEEK_STEP_SECS)
}

fn default_auto_hide_ticks() -> Option<u32> {
    Some(DEFAULT_AUTO_HIDE_TICKS)
}

fn default_poll_interval_ms() -> Option<u64> {
    Some(DEFAULT_POLL_INTERVAL_MS)
}

// =============================================================================
// Load Functions
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with the i18n key of a warning to show the user.
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
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
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
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_defaults_module() {
        let config = Config::default();
        assert_eq!(config.general.language, None);
        assert_eq!(config.playback.autoplay, Some(DEFAULT_AUTOPLAY));
        assert_eq!(config.playback.muted, Some(DEFAULT_MUTED));
        assert_eq!(config.playback.volume, Some(DEFAULT_VOLUME));
        assert_eq!(config.controls.auto_hide_ticks, Some(DEFAULT_AUTO_HIDE_TICKS));
        assert_eq!(config.tracks().len(), DEFAULT_TRACKS.len());
    }

    #[test]
    fn load_from_path_reads_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            r#"
[general]
language = "fr"

[playback]
muted = false
volume = 0.25

[playlist]
tracks = ["/videos/a.mp4", "/videos/b.mp4"]
"#,
        )
        .expect("failed to write config");

        let config = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(config.general.language.as_deref(), Some("fr"));
        assert_eq!(config.playback.muted, Some(false));
        assert_eq!(config.playback.volume, Some(0.25));
        // Missing keys keep their defaults
        assert_eq!(config.playback.autoplay, Some(DEFAULT_AUTOPLAY));
        assert_eq!(config.polling.interval_ms, Some(DEFAULT_POLL_INTERVAL_MS));
        assert_eq!(config.tracks(), vec!["/videos/a.mp4", "/videos/b.mp4"]);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_missing_file_returns_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_malformed_file_returns_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[playback]\nvolume = \"loud\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn poll_interval_is_clamped() {
        let mut config = Config::default();
        config.polling.interval_ms = Some(1);
        assert_eq!(
            config.poll_interval(),
            std::time::Duration::from_millis(MIN_POLL_INTERVAL_MS)
        );
        config.polling.interval_ms = None;
        assert_eq!(
            config.poll_interval(),
            std::time::Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        );
    }
}
