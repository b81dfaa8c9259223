// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::subscription::PlaybackMessage;
use crate::player::Intent;
use crate::ui::notifications;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// A request from the controls, the bookmark strip or the keyboard.
    Player(Intent),
    /// Output of the current decode session.
    Playback(PlaybackMessage),
    /// Position polling timer fired.
    PollTick(Instant),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
    Notification(notifications::NotificationMessage),
    /// Current mode of the main window, queried after it was resized.
    WindowModeChanged(iced::window::Mode),
    /// Native event not captured by a widget.
    RawEvent {
        window: iced::window::Id,
        event: iced::Event,
    },
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `FRAMEMARK_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Media sources replacing the configured playlist.
    pub tracks: Vec<String>,
}
