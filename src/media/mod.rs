// SPDX-License-Identifier: MPL-2.0
//! Media surface contract and its FFmpeg implementation.
//!
//! The player never decodes anything itself. It drives a [`MediaSurface`]
//! (position, duration, seeking, playback parameters, latest frame) and
//! reacts to the [`SurfaceEvent`]s the surface reports.
//!
//! - [`decoder`] - FFmpeg decode loop on a blocking thread
//! - [`surface`] - [`surface::FfmpegSurface`], the handle the UI holds
//! - [`subscription`] - Iced subscription owning one decode session
//! - [`audio`] - Audio stream decoding inside the decode loop
//! - [`audio_output`] - cpal output with shared volume and mute
//! - [`capture`] - Thumbnail capture for bookmarks

pub mod audio;
pub mod audio_output;
pub mod capture;
pub mod decoder;
pub mod subscription;
pub mod surface;

use crate::error::Result;
use crate::player::{PlaybackRate, Volume};
use std::sync::Arc;

/// A decoded video frame in RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

impl Frame {
    /// Returns true if the pixel buffer matches the frame dimensions.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.rgba_data.len() == (self.width as usize) * (self.height as usize) * 4
    }
}

/// Target of a seek request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Absolute position in seconds.
    Seconds(f64),
    /// Proportion (0.0..=1.0) of the duration.
    Fraction(f64),
}

impl SeekTarget {
    /// Resolves the target to seconds, clamped to `[0, duration]`.
    ///
    /// Returns `None` for a fraction while the duration is unknown.
    #[must_use]
    pub fn resolve(self, duration_secs: f64) -> Option<f64> {
        let known_duration = duration_secs.is_finite() && duration_secs > 0.0;
        match self {
            SeekTarget::Seconds(secs) if secs.is_finite() => {
                let secs = secs.max(0.0);
                Some(if known_duration {
                    secs.min(duration_secs)
                } else {
                    secs
                })
            }
            SeekTarget::Fraction(fraction) if fraction.is_finite() && known_duration => {
                Some(fraction.clamp(0.0, 1.0) * duration_secs)
            }
            _ => None,
        }
    }
}

/// Notifications pushed by a media surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The surface is waiting for data.
    BufferingStarted,
    /// Data is flowing again.
    BufferingEnded,
    /// Periodic progress report.
    Progress {
        position_secs: f64,
        duration_secs: f64,
    },
    /// Playback reached the end of the source.
    Ended,
    /// The source could not be opened or decoded.
    Failed(String),
}

/// A playing media source the shell can query and command.
///
/// Commands fail with [`crate::error::Error::MediaUnavailable`] once the
/// underlying pipeline is gone.
pub trait MediaSurface {
    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Duration in seconds, `NaN` until known.
    fn duration(&self) -> f64;

    fn seek_to(&mut self, target: SeekTarget) -> Result<()>;

    fn set_playing(&mut self, playing: bool) -> Result<()>;

    fn set_volume(&mut self, volume: Volume) -> Result<()>;

    fn set_muted(&mut self, muted: bool) -> Result<()>;

    fn set_playback_rate(&mut self, rate: PlaybackRate) -> Result<()>;

    /// Most recently presented frame, if any.
    fn current_frame(&self) -> Option<Frame>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn seconds_target_is_clamped_to_duration() {
        assert_eq!(SeekTarget::Seconds(-5.0).resolve(60.0), Some(0.0));
        assert_eq!(SeekTarget::Seconds(75.0).resolve(60.0), Some(60.0));
        assert_eq!(SeekTarget::Seconds(12.5).resolve(60.0), Some(12.5));
    }

    #[test]
    fn seconds_target_without_duration_only_clamps_at_zero() {
        assert_eq!(SeekTarget::Seconds(75.0).resolve(f64::NAN), Some(75.0));
        assert_eq!(SeekTarget::Seconds(f64::NAN).resolve(60.0), None);
    }

    #[test]
    fn fraction_target_scales_duration() {
        let secs = SeekTarget::Fraction(0.25).resolve(120.0).unwrap();
        assert_abs_diff_eq!(secs, 30.0);
        assert_eq!(SeekTarget::Fraction(2.0).resolve(120.0), Some(120.0));
        assert_eq!(SeekTarget::Fraction(0.5).resolve(f64::NAN), None);
    }

    #[test]
    fn frame_shape_is_checked() {
        let frame = Frame {
            rgba_data: Arc::new(vec![0; 16 * 9 * 4]),
            width: 16,
            height: 9,
            pts_secs: 0.0,
        };
        assert!(frame.is_well_formed());

        let truncated = Frame {
            rgba_data: Arc::new(vec![0; 10]),
            ..frame
        };
        assert!(!truncated.is_well_formed());
    }
}
