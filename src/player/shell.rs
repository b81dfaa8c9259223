// SPDX-License-Identifier: MPL-2.0
//! The player shell: owns all player state and reduces intents.
//!
//! The shell is generic over [`MediaSurface`] so it can be driven by the
//! FFmpeg surface in the application and by a fake surface in tests. It never
//! talks to Iced; anything the application must do (window mode, toasts) is
//! returned as an [`Effect`].

use super::state::PlayerState;
use super::time_format::{format_remaining, format_time};
use super::{Bookmark, BookmarkList, ControlsVisibility, Intent, SeekStep, TrackList};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::media::capture::capture_thumbnail;
use crate::media::{MediaSurface, SeekTarget, SurfaceEvent};

/// Whether the time label shows elapsed or remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    #[default]
    Elapsed,
    Remaining,
}

impl TimeDisplay {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            TimeDisplay::Elapsed => TimeDisplay::Remaining,
            TimeDisplay::Remaining => TimeDisplay::Elapsed,
        }
    }
}

/// Work the application has to carry out after a reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Switch the main window to or from fullscreen.
    SetFullscreen(bool),
    /// A bookmark was appended at this index.
    BookmarkAdded { index: usize },
    /// Thumbnail capture failed; playback continues.
    CaptureFailed(Error),
    /// The current source could not be played.
    PlaybackFailed(Error),
}

/// Player state plus the media surface it drives.
#[derive(Debug)]
pub struct Shell<S> {
    state: PlayerState,
    tracks: TrackList,
    visibility: ControlsVisibility,
    bookmarks: BookmarkList,
    time_display: TimeDisplay,
    seek_step: SeekStep,
    fullscreen: bool,
    session: u64,
    position_secs: f64,
    duration_secs: f64,
    surface: Option<S>,
}

impl<S: MediaSurface> Shell<S> {
    /// Creates a shell on the first track, waiting for its surface.
    #[must_use]
    pub fn new(tracks: TrackList, config: &Config) -> Self {
        let mut state = PlayerState::from_config(&config.playback);
        state.set_loading(true);
        Self {
            state,
            tracks,
            visibility: config
                .controls
                .auto_hide_ticks
                .map_or_else(ControlsVisibility::default, ControlsVisibility::new),
            bookmarks: BookmarkList::new(),
            time_display: TimeDisplay::default(),
            seek_step: config
                .playback
                .seek_step_secs
                .map_or_else(SeekStep::default, SeekStep::new),
            fullscreen: false,
            session: 0,
            position_secs: 0.0,
            duration_secs: f64::NAN,
            surface: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[must_use]
    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    #[must_use]
    pub fn visibility(&self) -> &ControlsVisibility {
        &self.visibility
    }

    #[must_use]
    pub fn bookmarks(&self) -> &BookmarkList {
        &self.bookmarks
    }

    #[must_use]
    pub fn time_display(&self) -> TimeDisplay {
        self.time_display
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Identifier of the current decode session. Bumped on every track
    /// change so stale surface messages can be told apart.
    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }

    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Source of the current track.
    #[must_use]
    pub fn current_source(&self) -> &str {
        self.tracks.get(self.state.current_track()).unwrap_or_default()
    }

    #[must_use]
    pub fn current_track_name(&self) -> &str {
        self.tracks
            .display_name(self.state.current_track())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Position label, elapsed or remaining depending on the time display.
    #[must_use]
    pub fn position_label(&self) -> String {
        match self.time_display {
            TimeDisplay::Elapsed => format_time(self.position_secs),
            TimeDisplay::Remaining => format_remaining(self.position_secs, self.duration_secs),
        }
    }

    #[must_use]
    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs)
    }

    /// Takes ownership of a freshly started surface and pushes the current
    /// playback parameters to it.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        let volume = self.state.volume();
        let muted = self.state.is_muted();
        let rate = self.state.playback_rate();
        let playing = self.state.is_playing();
        self.with_surface("attach", |surface| {
            surface.set_volume(volume)?;
            surface.set_muted(muted)?;
            surface.set_playback_rate(rate)?;
            surface.set_playing(playing)
        });
    }

    /// Records the window mode once the application has applied or observed
    /// it. [`Effect::SetFullscreen`] only requests the change.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Drops the surface. Polling stops with it.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Reduces one intent.
    pub fn handle(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::TogglePlayback => {
                self.state.toggle_playback();
                let playing = self.state.is_playing();
                self.with_surface("toggle playback", |surface| surface.set_playing(playing));
            }
            Intent::Rewind => self.skip(-self.seek_step.value()),
            Intent::FastForward => self.skip(self.seek_step.value()),
            Intent::ToggleMute => {
                self.state.toggle_mute();
                self.push_mute();
            }
            Intent::SetVolume(volume) => self.apply_volume(volume),
            Intent::CommitVolume => {}
            Intent::VolumeUp => self.apply_volume(self.state.volume().increase()),
            Intent::VolumeDown => self.apply_volume(self.state.volume().decrease()),
            Intent::SetPlaybackRate(rate) => {
                self.state.set_playback_rate(rate);
                self.with_surface("set playback rate", |surface| {
                    surface.set_playback_rate(rate)
                });
            }
            Intent::SeekPreview(fraction) => {
                // The slider captures pointer moves while dragged
                self.visibility.on_pointer_moved();
                self.state.preview_seek(fraction);
            }
            Intent::SeekCommit => {
                let fraction = self.state.commit_seek();
                self.with_surface("seek", |surface| {
                    surface.seek_to(SeekTarget::Fraction(fraction))
                });
            }
            Intent::NextTrack => {
                let index = self.tracks.next_index(self.state.current_track());
                self.select_track(index);
            }
            Intent::PreviousTrack => {
                let index = self.tracks.previous_index(self.state.current_track());
                self.select_track(index);
            }
            Intent::ToggleMinimize => self.state.toggle_minimized(),
            Intent::ToggleTimeDisplay => self.time_display = self.time_display.toggled(),
            Intent::ToggleFullscreen => return Effect::SetFullscreen(!self.fullscreen),
            Intent::ExitFullscreen => {
                if !self.fullscreen {
                    tracing::debug!("exit fullscreen ignored: not fullscreen");
                    return Effect::None;
                }
                return Effect::SetFullscreen(false);
            }
            Intent::AddBookmark => {
                return match self.add_bookmark() {
                    Ok(index) => Effect::BookmarkAdded { index },
                    Err(Error::MediaUnavailable) => {
                        tracing::debug!("bookmark ignored: no media surface");
                        Effect::None
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "bookmark capture failed");
                        Effect::CaptureFailed(e)
                    }
                };
            }
            Intent::JumpToBookmark(index) => match self.bookmarks.get(index) {
                Some(bookmark) => {
                    let target = SeekTarget::Seconds(bookmark.timestamp_secs());
                    self.with_surface("jump to bookmark", |surface| surface.seek_to(target));
                }
                None => tracing::debug!(index, "no bookmark at index"),
            },
            Intent::PointerMoved => self.visibility.on_pointer_moved(),
        }
        Effect::None
    }

    /// Reduces one notification from the current surface.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) -> Effect {
        match event {
            SurfaceEvent::BufferingStarted => self.state.set_loading(true),
            SurfaceEvent::BufferingEnded => self.state.set_loading(false),
            SurfaceEvent::Progress {
                position_secs,
                duration_secs,
            } => {
                if !self.state.is_seeking() {
                    self.visibility.on_progress_tick();
                }
                self.record_position(position_secs, duration_secs);
            }
            SurfaceEvent::Ended => {
                self.state.set_playing(false);
                self.state.set_loading(false);
                if self.duration_secs.is_finite() {
                    self.record_position(self.duration_secs, self.duration_secs);
                }
            }
            SurfaceEvent::Failed(message) => {
                tracing::error!(source = self.current_source(), %message, "playback failed");
                self.state.set_loading(false);
                return Effect::PlaybackFailed(Error::Decode(message));
            }
        }
        Effect::None
    }

    /// Polling tick: reads position and duration from the surface.
    pub fn poll(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let position = surface.current_time();
        let duration = surface.duration();
        self.record_position(position, duration);
    }

    /// Captures the surface's latest frame as a bookmark at the current time.
    pub fn add_bookmark(&mut self) -> Result<usize> {
        let surface = self.surface.as_ref().ok_or(Error::MediaUnavailable)?;
        let timestamp = surface.current_time();
        let frame = surface
            .current_frame()
            .ok_or_else(|| Error::CaptureFailed("no frame has been presented yet".into()))?;
        let thumbnail = capture_thumbnail(&frame)?;
        let index = self.bookmarks.push(Bookmark::new(timestamp, thumbnail));
        tracing::info!(index, timestamp, "bookmark added");
        Ok(index)
    }

    fn select_track(&mut self, index: usize) {
        self.state.select_track(index);
        self.state.set_loading(true);
        self.session += 1;
        self.surface = None;
        self.position_secs = 0.0;
        self.duration_secs = f64::NAN;
        tracing::info!(index, source = self.current_source(), "track changed");
    }

    fn skip(&mut self, delta_secs: f64) {
        self.with_surface("skip", |surface| {
            let duration = surface.duration();
            match SeekTarget::Seconds(surface.current_time() + delta_secs).resolve(duration) {
                Some(target) => surface.seek_to(SeekTarget::Seconds(target)),
                None => Ok(()),
            }
        });
    }

    fn apply_volume(&mut self, volume: super::Volume) {
        self.state.set_volume(volume);
        self.with_surface("set volume", |surface| surface.set_volume(volume));
        self.push_mute();
    }

    fn push_mute(&mut self) {
        let muted = self.state.is_muted();
        self.with_surface("set muted", |surface| surface.set_muted(muted));
    }

    fn record_position(&mut self, position_secs: f64, duration_secs: f64) {
        if !self.state.is_seeking() && position_secs.is_finite() {
            self.position_secs = position_secs.max(0.0);
        }
        if duration_secs.is_finite() && duration_secs > 0.0 {
            self.duration_secs = duration_secs;
        }
        self.state.apply_progress(position_secs, duration_secs);
    }

    fn with_surface(&mut self, action: &str, f: impl FnOnce(&mut S) -> Result<()>) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(action, "ignored: no media surface");
            return;
        };
        match f(surface) {
            Ok(()) => {}
            Err(Error::MediaUnavailable) => {
                tracing::debug!(action, "ignored: media surface unavailable");
            }
            Err(e) => tracing::warn!(action, error = %e, "media surface command failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Frame;
    use crate::player::{PlaybackRate, Volume};
    use crate::test_utils::assert_abs_diff_eq;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct StubSurface {
        time: f64,
        duration: f64,
        seeks: Vec<SeekTarget>,
        playing: Option<bool>,
        frame: Option<Frame>,
    }

    impl MediaSurface for StubSurface {
        fn current_time(&self) -> f64 {
            self.time
        }
        fn duration(&self) -> f64 {
            self.duration
        }
        fn seek_to(&mut self, target: SeekTarget) -> Result<()> {
            self.seeks.push(target);
            Ok(())
        }
        fn set_playing(&mut self, playing: bool) -> Result<()> {
            self.playing = Some(playing);
            Ok(())
        }
        fn set_volume(&mut self, _volume: Volume) -> Result<()> {
            Ok(())
        }
        fn set_muted(&mut self, _muted: bool) -> Result<()> {
            Ok(())
        }
        fn set_playback_rate(&mut self, _rate: PlaybackRate) -> Result<()> {
            Ok(())
        }
        fn current_frame(&self) -> Option<Frame> {
            self.frame.clone()
        }
    }

    fn shell() -> Shell<StubSurface> {
        let tracks = TrackList::new(vec!["a.mp4".into(), "b.mp4".into()]).unwrap();
        Shell::new(tracks, &Config::default())
    }

    #[test]
    fn new_shell_is_loading_without_surface() {
        let shell = shell();
        assert!(shell.state().is_loading());
        assert!(!shell.has_surface());
        assert_eq!(shell.current_source(), "a.mp4");
    }

    #[test]
    fn attach_pushes_playing_state() {
        let mut shell = shell();
        shell.attach_surface(StubSurface::default());
        assert_eq!(shell.surface().unwrap().playing, Some(true));
    }

    #[test]
    fn rewind_clamps_at_zero() {
        let mut shell = shell();
        shell.attach_surface(StubSurface {
            time: 4.0,
            duration: 60.0,
            ..StubSurface::default()
        });
        shell.handle(Intent::Rewind);
        assert_eq!(shell.surface().unwrap().seeks, vec![SeekTarget::Seconds(0.0)]);
    }

    #[test]
    fn fast_forward_clamps_at_duration() {
        let mut shell = shell();
        shell.attach_surface(StubSurface {
            time: 55.0,
            duration: 60.0,
            ..StubSurface::default()
        });
        shell.handle(Intent::FastForward);
        assert_eq!(shell.surface().unwrap().seeks, vec![SeekTarget::Seconds(60.0)]);
    }

    #[test]
    fn track_change_drops_surface_and_bumps_session() {
        let mut shell = shell();
        shell.attach_surface(StubSurface::default());
        shell.handle(Intent::NextTrack);
        assert!(!shell.has_surface());
        assert_eq!(shell.session(), 1);
        assert_eq!(shell.current_source(), "b.mp4");
        assert!(shell.state().is_loading());
    }

    #[test]
    fn escape_only_exits_when_fullscreen() {
        let mut shell = shell();
        assert_eq!(shell.handle(Intent::ExitFullscreen), Effect::None);
        assert_eq!(shell.handle(Intent::ToggleFullscreen), Effect::SetFullscreen(true));
        shell.set_fullscreen(true);
        assert_eq!(
            shell.handle(Intent::ExitFullscreen),
            Effect::SetFullscreen(false)
        );
    }

    #[test]
    fn fullscreen_request_does_not_change_mode_until_applied() {
        let mut shell = shell();
        assert_eq!(shell.handle(Intent::ToggleFullscreen), Effect::SetFullscreen(true));
        assert!(!shell.is_fullscreen());
        assert_eq!(shell.handle(Intent::ToggleFullscreen), Effect::SetFullscreen(true));
        shell.set_fullscreen(true);
        assert_eq!(shell.handle(Intent::ToggleFullscreen), Effect::SetFullscreen(false));
    }

    #[test]
    fn controls_stay_visible_during_a_long_seek_drag() {
        let mut shell = shell();
        let threshold = shell.visibility().threshold();
        shell.handle(Intent::SeekPreview(0.5));
        for i in 0..=threshold + 1 {
            shell.handle_surface_event(SurfaceEvent::Progress {
                position_secs: f64::from(i),
                duration_secs: 60.0,
            });
        }
        assert!(shell.visibility().is_visible());
        assert_eq!(shell.visibility().idle_ticks(), 0);
        assert!(shell.state().is_seeking());
    }

    #[test]
    fn bookmark_without_frame_reports_capture_failure() {
        let mut shell = shell();
        shell.attach_surface(StubSurface::default());
        let effect = shell.handle(Intent::AddBookmark);
        assert!(matches!(effect, Effect::CaptureFailed(Error::CaptureFailed(_))));
        assert!(shell.bookmarks().is_empty());
    }

    #[test]
    fn bookmark_without_surface_is_ignored() {
        let mut shell = shell();
        assert_eq!(shell.handle(Intent::AddBookmark), Effect::None);
    }

    #[test]
    fn bookmark_captures_current_frame() {
        let mut shell = shell();
        shell.attach_surface(StubSurface {
            time: 65.0,
            duration: 120.0,
            frame: Some(Frame {
                rgba_data: Arc::new(vec![200; 32 * 18 * 4]),
                width: 32,
                height: 18,
                pts_secs: 65.0,
            }),
            ..StubSurface::default()
        });
        assert_eq!(
            shell.handle(Intent::AddBookmark),
            Effect::BookmarkAdded { index: 0 }
        );
        let bookmark = shell.bookmarks().get(0).unwrap();
        assert_eq!(bookmark.display_text(), "01:05");
        assert_eq!(bookmark.thumbnail().width(), 160);
    }

    #[test]
    fn ended_stops_playback_and_fills_progress() {
        let mut shell = shell();
        shell.handle_surface_event(SurfaceEvent::Progress {
            position_secs: 30.0,
            duration_secs: 60.0,
        });
        shell.handle_surface_event(SurfaceEvent::Ended);
        assert!(!shell.state().is_playing());
        assert_abs_diff_eq!(shell.state().played_fraction(), 1.0);
    }

    #[test]
    fn failure_clears_loading_and_reports() {
        let mut shell = shell();
        let effect = shell.handle_surface_event(SurfaceEvent::Failed("bad".into()));
        assert_eq!(effect, Effect::PlaybackFailed(Error::Decode("bad".into())));
        assert!(!shell.state().is_loading());
    }

    #[test]
    fn remaining_label_counts_down() {
        let mut shell = shell();
        shell.handle_surface_event(SurfaceEvent::Progress {
            position_secs: 20.0,
            duration_secs: 65.0,
        });
        assert_eq!(shell.position_label(), "00:20");
        shell.handle(Intent::ToggleTimeDisplay);
        assert_eq!(shell.position_label(), "-00:45");
        assert_eq!(shell.duration_label(), "01:05");
    }
}
