// SPDX-License-Identifier: MPL-2.0
//! Requests emitted by the controls overlay and the keyboard listener.

use super::{PlaybackRate, Volume};

/// A user request, reduced by [`super::Shell::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    TogglePlayback,
    Rewind,
    FastForward,
    ToggleMute,
    /// Volume slider moved.
    SetVolume(Volume),
    /// Volume slider released.
    CommitVolume,
    VolumeUp,
    VolumeDown,
    SetPlaybackRate(PlaybackRate),
    /// Seek slider dragged to a fraction of the duration.
    SeekPreview(f64),
    /// Seek slider released.
    SeekCommit,
    NextTrack,
    PreviousTrack,
    ToggleMinimize,
    ToggleTimeDisplay,
    ToggleFullscreen,
    ExitFullscreen,
    AddBookmark,
    JumpToBookmark(usize),
    PointerMoved,
}
