// SPDX-License-Identifier: MPL-2.0
//! Tick-driven auto-hide of the controls overlay.
//!
//! The idle counter advances on progress notifications from the media
//! surface, not on wall-clock time. With a decoder reporting about once per
//! second of media, the default threshold of 3 hides the controls after
//! roughly four seconds without pointer movement. While paused no progress
//! is reported, so the controls stay up.

use crate::config::{DEFAULT_AUTO_HIDE_TICKS, MAX_AUTO_HIDE_TICKS, MIN_AUTO_HIDE_TICKS};

/// Visibility of the controls overlay plus its idle counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsVisibility {
    visible: bool,
    idle_ticks: u32,
    threshold: u32,
}

impl ControlsVisibility {
    /// Creates a visible overlay that hides once the idle counter exceeds
    /// `threshold` (clamped to the supported range).
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            visible: true,
            idle_ticks: 0,
            threshold: threshold.clamp(MIN_AUTO_HIDE_TICKS, MAX_AUTO_HIDE_TICKS),
        }
    }

    /// Pointer moved over the player: show the controls and restart counting.
    pub fn on_pointer_moved(&mut self) {
        self.visible = true;
        self.idle_ticks = 0;
    }

    /// A progress notification arrived from the media surface.
    pub fn on_progress_tick(&mut self) {
        if !self.visible {
            return;
        }
        self.idle_ticks += 1;
        if self.idle_ticks > self.threshold {
            self.visible = false;
            self.idle_ticks = 0;
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for ControlsVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_HIDE_TICKS)
    }
}
