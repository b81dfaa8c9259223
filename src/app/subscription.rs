// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! All of them are declared from state: when a condition stops holding the
//! subscription is no longer returned and Iced cancels it.

use super::Message;
use crate::media::subscription::{self as playback, PlaybackSession};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Notification auto-dismiss granularity.
const NOTIFICATION_TICK: Duration = Duration::from_millis(250);

/// Routes keyboard and window events that no widget captured.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window| {
        if !matches!(
            event,
            event::Event::Keyboard(iced::keyboard::Event::KeyPressed { .. })
                | event::Event::Window(_)
        ) {
            return None;
        }
        match status {
            event::Status::Ignored => Some(Message::RawEvent { window, event }),
            event::Status::Captured => None,
        }
    })
}

/// Polls the media surface for its position while one exists.
pub fn create_poll_subscription(has_surface: bool, interval: Duration) -> Subscription<Message> {
    if has_surface {
        time::every(interval).map(Message::PollTick)
    } else {
        Subscription::none()
    }
}

/// Ticks the notification manager while toasts are showing.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(NOTIFICATION_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Runs the decode session for the current track.
pub fn create_playback_subscription(session: PlaybackSession) -> Subscription<Message> {
    playback::playback(session).map(Message::Playback)
}
