// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume**: Audio volume level and step
//! - **Playback Rate**: The fixed set of selectable rates
//! - **Seek**: Rewind/fast-forward step
//! - **Controls**: Auto-hide tick threshold
//! - **Polling**: Position polling period
//! - **Thumbnail**: Bookmark thumbnail size
//! - **Playlist**: Tracks played when none are configured

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press (10%).
pub const VOLUME_STEP: f32 = 0.1;

/// Whether playback starts muted.
pub const DEFAULT_MUTED: bool = true;

/// Whether playback starts as soon as a track is loaded.
pub const DEFAULT_AUTOPLAY: bool = true;

// ==========================================================================
// Playback Rate Defaults
// ==========================================================================

/// Selectable playback rates, ascending.
pub const PLAYBACK_RATES: [f64; 8] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 4.0];

/// Default playback rate (normal speed).
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Default rewind/fast-forward step in seconds.
pub const DEFAULT_SEEK_STEP_SECS: f64 = 10.0;

/// Minimum seek step in seconds.
pub const MIN_SEEK_STEP_SECS: f64 = 1.0;

/// Maximum seek step in seconds.
pub const MAX_SEEK_STEP_SECS: f64 = 60.0;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Progress ticks the controls stay visible without pointer movement.
pub const DEFAULT_AUTO_HIDE_TICKS: u32 = 3;

/// Minimum auto-hide threshold.
pub const MIN_AUTO_HIDE_TICKS: u32 = 1;

/// Maximum auto-hide threshold.
pub const MAX_AUTO_HIDE_TICKS: u32 = 30;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Default position polling period in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Minimum polling period in milliseconds.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Maximum polling period in milliseconds.
pub const MAX_POLL_INTERVAL_MS: u64 = 10_000;

// ==========================================================================
// Thumbnail Defaults
// ==========================================================================

/// Bookmark thumbnail width in pixels.
pub const THUMBNAIL_WIDTH: u32 = 160;

/// Bookmark thumbnail height in pixels.
pub const THUMBNAIL_HEIGHT: u32 = 90;

// ==========================================================================
// Playlist Defaults
// ==========================================================================

/// Sample tracks used when neither the command line nor the config file
/// provides a playlist.
pub const DEFAULT_TRACKS: [&str; 4] = [
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
];

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Volume validation
    assert!(MIN_VOLUME >= 0.0);
    assert!(MAX_VOLUME > MIN_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);

    // Playback rate validation
    let mut i = 1;
    while i < PLAYBACK_RATES.len() {
        assert!(PLAYBACK_RATES[i] > PLAYBACK_RATES[i - 1]);
        i += 1;
    }
    assert!(PLAYBACK_RATES[0] > 0.0);

    // Seek step validation
    assert!(MIN_SEEK_STEP_SECS > 0.0);
    assert!(MAX_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
    assert!(DEFAULT_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
    assert!(DEFAULT_SEEK_STEP_SECS <= MAX_SEEK_STEP_SECS);

    // Auto-hide validation
    assert!(MIN_AUTO_HIDE_TICKS > 0);
    assert!(MAX_AUTO_HIDE_TICKS >= MIN_AUTO_HIDE_TICKS);
    assert!(DEFAULT_AUTO_HIDE_TICKS >= MIN_AUTO_HIDE_TICKS);
    assert!(DEFAULT_AUTO_HIDE_TICKS <= MAX_AUTO_HIDE_TICKS);

    // Polling validation
    assert!(MIN_POLL_INTERVAL_MS > 0);
    assert!(MAX_POLL_INTERVAL_MS >= MIN_POLL_INTERVAL_MS);
    assert!(DEFAULT_POLL_INTERVAL_MS >= MIN_POLL_INTERVAL_MS);
    assert!(DEFAULT_POLL_INTERVAL_MS <= MAX_POLL_INTERVAL_MS);

    // Thumbnail validation
    assert!(THUMBNAIL_WIDTH > 0);
    assert!(THUMBNAIL_HEIGHT > 0);

    assert!(!DEFAULT_TRACKS.is_empty());
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_defaults_are_valid() {
        assert_eq!(DEFAULT_VOLUME, 0.5);
        assert!(DEFAULT_VOLUME >= MIN_VOLUME);
        assert!(DEFAULT_VOLUME <= MAX_VOLUME);
        assert!(VOLUME_STEP > 0.0);
    }

    #[test]
    fn default_rate_is_a_selectable_rate() {
        assert!(PLAYBACK_RATES.contains(&DEFAULT_PLAYBACK_RATE));
    }

    #[test]
    fn seek_step_defaults_are_valid() {
        assert_eq!(DEFAULT_SEEK_STEP_SECS, 10.0);
        assert!(DEFAULT_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
        assert!(DEFAULT_SEEK_STEP_SECS <= MAX_SEEK_STEP_SECS);
    }

    #[test]
    fn thumbnail_is_sixteen_by_nine() {
        assert_eq!(THUMBNAIL_WIDTH * 9, THUMBNAIL_HEIGHT * 16);
    }

    #[test]
    fn default_tracks_are_urls() {
        for track in DEFAULT_TRACKS {
            assert!(track.starts_with("http"));
        }
    }
}
