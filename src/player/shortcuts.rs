// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcut dispatch.
//!
//! | Key | Intent |
//! |-----|--------|
//! | Space | play/pause |
//! | Up / Down | volume +/-10% |
//! | Left / Right | rewind / fast-forward |
//! | M | mute |
//! | F | fullscreen |
//! | Escape | exit fullscreen |
//! | N / P | next / previous track |
//! | W | minimize |
//! | B | bookmark |

use super::Intent;
use iced::keyboard::{self, key::Named, Key};

/// Maps a key press to an intent. Letter keys are case-insensitive and
/// ignored while a command or alt modifier is held, so system shortcuts
/// pass through.
#[must_use]
pub fn intent_for_key(key: &Key, modifiers: keyboard::Modifiers) -> Option<Intent> {
    match key {
        Key::Named(named) => match named {
            Named::Space => Some(Intent::TogglePlayback),
            Named::ArrowUp => Some(Intent::VolumeUp),
            Named::ArrowDown => Some(Intent::VolumeDown),
            Named::ArrowLeft => Some(Intent::Rewind),
            Named::ArrowRight => Some(Intent::FastForward),
            Named::Escape => Some(Intent::ExitFullscreen),
            _ => None,
        },
        Key::Character(c) if !modifiers.command() && !modifiers.alt() => {
            match c.to_lowercase().as_str() {
                "m" => Some(Intent::ToggleMute),
                "f" => Some(Intent::ToggleFullscreen),
                "n" => Some(Intent::NextTrack),
                "p" => Some(Intent::PreviousTrack),
                "w" => Some(Intent::ToggleMinimize),
                "b" => Some(Intent::AddBookmark),
                _ => None,
            }
        }
        _ => None,
    }
}
