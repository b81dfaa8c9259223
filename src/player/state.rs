// SPDX-License-Identifier: MPL-2.0
//! Playback state record and its transitions.
//!
//! Every method here is a pure state change. Talking to the media surface is
//! the shell's job; see [`super::Shell`].

use super::{PlaybackRate, Volume};
use crate::config::PlaybackConfig;

/// Session-lifetime playback state, owned by the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    playing: bool,
    muted: bool,
    volume: Volume,
    playback_rate: PlaybackRate,
    played_fraction: f64,
    seeking: bool,
    current_track: usize,
    minimized: bool,
    loading: bool,
}

impl PlayerState {
    /// Builds the initial state from the `[playback]` config section.
    #[must_use]
    pub fn from_config(config: &PlaybackConfig) -> Self {
        let defaults = Self::default();
        Self {
            playing: config.autoplay.unwrap_or(defaults.playing),
            muted: config.muted.unwrap_or(defaults.muted),
            volume: config.volume.map_or(defaults.volume, Volume::new),
            playback_rate: config
                .playback_rate
                .map_or(defaults.playback_rate, PlaybackRate::new),
            ..defaults
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn playback_rate(&self) -> PlaybackRate {
        self.playback_rate
    }

    /// Progress through the current track, in 0.0..=1.0.
    #[must_use]
    pub fn played_fraction(&self) -> f64 {
        self.played_fraction
    }

    #[must_use]
    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    #[must_use]
    pub fn current_track(&self) -> usize {
        self.current_track
    }

    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn toggle_playback(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Toggles mute without touching the volume level.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Sets the volume; a zero volume mutes, any other level unmutes.
    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.muted = volume.is_muted();
    }

    pub fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.playback_rate = rate;
    }

    /// Seek slider is being dragged.
    pub fn preview_seek(&mut self, fraction: f64) {
        self.seeking = true;
        self.played_fraction = clamp_fraction(fraction);
    }

    /// Seek slider released. Returns the fraction to seek to.
    pub fn commit_seek(&mut self) -> f64 {
        self.seeking = false;
        self.played_fraction
    }

    /// Applies a position report. Ignored while seeking so a drag in progress
    /// is never overwritten. Returns whether the fraction was updated.
    pub fn apply_progress(&mut self, position_secs: f64, duration_secs: f64) -> bool {
        if self.seeking {
            return false;
        }
        match fraction_of(position_secs, duration_secs) {
            Some(fraction) => {
                self.played_fraction = fraction;
                true
            }
            None => false,
        }
    }

    /// Switches to another track; the new source starts from the beginning.
    pub fn select_track(&mut self, index: usize) {
        self.current_track = index;
        self.played_fraction = 0.0;
        self.seeking = false;
    }

    /// Toggles the floating pane layout. Playback is not paused.
    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            playing: crate::config::DEFAULT_AUTOPLAY,
            muted: crate::config::DEFAULT_MUTED,
            volume: Volume::default(),
            playback_rate: PlaybackRate::default(),
            played_fraction: 0.0,
            seeking: false,
            current_track: 0,
            minimized: false,
            loading: false,
        }
    }
}

/// `position / duration` clamped to 0.0..=1.0, or `None` while the duration
/// is unknown.
#[must_use]
pub fn fraction_of(position_secs: f64, duration_secs: f64) -> Option<f64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || !position_secs.is_finite() {
        return None;
    }
    Some(clamp_fraction(position_secs / duration_secs))
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_matches_initial_player_state() {
        let state = PlayerState::default();
        assert!(state.is_playing());
        assert!(state.is_muted());
        assert_abs_diff_eq!(state.volume().value(), 0.5);
        assert!(state.playback_rate().is_normal());
        assert_abs_diff_eq!(state.played_fraction(), 0.0);
        assert!(!state.is_seeking());
        assert_eq!(state.current_track(), 0);
        assert!(!state.is_minimized());
        assert!(!state.is_loading());
    }

    #[test]
    fn from_config_applies_playback_section() {
        let config = PlaybackConfig {
            autoplay: Some(false),
            muted: Some(false),
            volume: Some(0.8),
            playback_rate: Some(1.5),
            seek_step_secs: None,
        };
        let state = PlayerState::from_config(&config);
        assert!(!state.is_playing());
        assert!(!state.is_muted());
        assert_abs_diff_eq!(state.volume().value(), 0.8);
        assert_abs_diff_eq!(state.playback_rate().value(), 1.5);
    }

    #[test]
    fn set_volume_zero_mutes() {
        let mut state = PlayerState::default();
        state.toggle_mute();
        assert!(!state.is_muted());

        state.set_volume(Volume::new(0.0));
        assert!(state.is_muted());
    }

    #[test]
    fn set_volume_nonzero_unmutes() {
        let mut state = PlayerState::default();
        assert!(state.is_muted());

        state.set_volume(Volume::new(0.3));
        assert!(!state.is_muted());
        assert_abs_diff_eq!(state.volume().value(), 0.3);
    }

    #[test]
    fn toggle_mute_keeps_volume() {
        let mut state = PlayerState::default();
        state.set_volume(Volume::new(0.0));
        state.toggle_mute();
        assert!(!state.is_muted());
        assert_abs_diff_eq!(state.volume().value(), 0.0);
    }

    #[test]
    fn seeking_suppresses_progress() {
        let mut state = PlayerState::default();
        state.preview_seek(0.25);
        assert!(state.is_seeking());

        for position in [10.0, 20.0, 30.0] {
            assert!(!state.apply_progress(position, 100.0));
            assert_abs_diff_eq!(state.played_fraction(), 0.25);
        }

        let target = state.commit_seek();
        assert!(!state.is_seeking());
        assert_abs_diff_eq!(target, 0.25);

        assert!(state.apply_progress(50.0, 100.0));
        assert_abs_diff_eq!(state.played_fraction(), 0.5);
    }

    #[test]
    fn preview_seek_clamps_fraction() {
        let mut state = PlayerState::default();
        state.preview_seek(1.7);
        assert_abs_diff_eq!(state.played_fraction(), 1.0);
        state.preview_seek(f64::NAN);
        assert_abs_diff_eq!(state.played_fraction(), 0.0);
    }

    #[test]
    fn progress_with_unknown_duration_is_ignored() {
        let mut state = PlayerState::default();
        assert!(!state.apply_progress(5.0, f64::NAN));
        assert!(!state.apply_progress(5.0, 0.0));
        assert_abs_diff_eq!(state.played_fraction(), 0.0);
    }

    #[test]
    fn select_track_resets_progress() {
        let mut state = PlayerState::default();
        state.apply_progress(30.0, 60.0);
        state.select_track(2);
        assert_eq!(state.current_track(), 2);
        assert_abs_diff_eq!(state.played_fraction(), 0.0);
    }

    #[test]
    fn toggle_minimized_keeps_playing() {
        let mut state = PlayerState::default();
        state.toggle_minimized();
        assert!(state.is_minimized());
        assert!(state.is_playing());
    }

    #[test]
    fn fraction_of_guards_bad_input() {
        assert_eq!(fraction_of(10.0, 40.0), Some(0.25));
        assert_eq!(fraction_of(50.0, 40.0), Some(1.0));
        assert_eq!(fraction_of(f64::NAN, 40.0), None);
        assert_eq!(fraction_of(1.0, f64::INFINITY), None);
    }
}
