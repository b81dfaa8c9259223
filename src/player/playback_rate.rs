// SPDX-License-Identifier: MPL-2.0
//! Playback rate domain type.
//!
//! The rate is restricted to the fixed set in [`PLAYBACK_RATES`]; arbitrary
//! values snap to the nearest selectable one.

use crate::config::{DEFAULT_PLAYBACK_RATE, PLAYBACK_RATES};
use std::fmt;

/// Playback rate, guaranteed to be one of [`PLAYBACK_RATES`].
///
/// # Example
///
/// ```
/// use framemark::player::PlaybackRate;
///
/// assert_eq!(PlaybackRate::new(1.5).value(), 1.5);
///
/// // Values outside the selectable set snap to the nearest rate
/// assert_eq!(PlaybackRate::new(3.9).value(), 4.0);
/// assert_eq!(PlaybackRate::new(0.1).value(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Creates a playback rate, snapping to the nearest selectable rate.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        if !rate.is_finite() {
            return Self::default();
        }
        let nearest = PLAYBACK_RATES
            .iter()
            .copied()
            .min_by(|a, b| (a - rate).abs().total_cmp(&(b - rate).abs()))
            .unwrap_or(DEFAULT_PLAYBACK_RATE);
        Self(nearest)
    }

    /// Returns the rate as a multiplier of normal speed.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns every selectable rate, ascending.
    pub fn all() -> impl Iterator<Item = PlaybackRate> {
        PLAYBACK_RATES.iter().map(|&rate| PlaybackRate(rate))
    }

    /// Returns true if this is normal speed.
    #[must_use]
    pub fn is_normal(self) -> bool {
        (self.0 - 1.0).abs() < 0.001
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_RATE)
    }
}

impl fmt::Display for PlaybackRate {
    /// Formats as a multiplier without trailing zeros: `0.75x`, `1x`, `2x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}x", self.0 as u32)
        } else {
            let formatted = format!("{:.2}", self.0);
            write!(f, "{}x", formatted.trim_end_matches('0'))
        }
    }
}
