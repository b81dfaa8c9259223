// SPDX-License-Identifier: MPL-2.0
//! Message handlers for `App::update`.
//!
//! Player intents are reduced by the shell; the handlers here only turn the
//! resulting [`Effect`]s into Iced tasks and toasts.

use super::Message;
use crate::error::Error;
use crate::media::subscription::PlaybackMessage;
use crate::media::surface::FfmpegSurface;
use crate::player::{shortcuts, Effect, Intent, Shell};
use crate::ui::notifications::{self, Notification};
use crate::ui::video_canvas::VideoCanvas;
use iced::{keyboard, window, Task};

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub shell: &'a mut Shell<FfmpegSurface>,
    pub canvas: &'a mut VideoCanvas<Intent>,
    pub notifications: &'a mut notifications::Manager,
    pub window_id: &'a mut Option<window::Id>,
}

/// Reduces a player intent and applies its effect.
pub fn handle_intent(ctx: &mut UpdateContext<'_>, intent: Intent) -> Task<Message> {
    let session_before = ctx.shell.session();
    let effect = ctx.shell.handle(intent);

    if ctx.shell.session() != session_before {
        // New track: the old decoder is dropped with its subscription
        ctx.canvas.clear();
        ctx.notifications.clear_playback_errors();
    }

    apply_effect(ctx, effect)
}

/// Handles output of the decode subscription.
pub fn handle_playback_message(
    ctx: &mut UpdateContext<'_>,
    message: PlaybackMessage,
) -> Task<Message> {
    if message.session_id() != ctx.shell.session() {
        tracing::debug!(
            session_id = message.session_id(),
            current = ctx.shell.session(),
            "dropping message from a stale decode session"
        );
        return Task::none();
    }

    match message {
        PlaybackMessage::Started { surface, .. } => {
            ctx.shell.attach_surface(surface);
            Task::none()
        }
        PlaybackMessage::FrameReady { frame, .. } => {
            ctx.canvas.set_frame(&frame);
            Task::none()
        }
        PlaybackMessage::Event { event, .. } => {
            let effect = ctx.shell.handle_surface_event(event);
            apply_effect(ctx, effect)
        }
    }
}

/// Handles a native event that no widget captured.
pub fn handle_raw_event(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    event: &iced::Event,
) -> Task<Message> {
    *ctx.window_id = Some(window);

    match event {
        iced::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            match shortcuts::intent_for_key(key, *modifiers) {
                Some(intent) => handle_intent(ctx, intent),
                None => Task::none(),
            }
        }
        // Fullscreen can also be left through the window manager
        iced::Event::Window(window::Event::Resized(_)) => {
            window::mode(window).map(Message::WindowModeChanged)
        }
        _ => Task::none(),
    }
}

/// Syncs the shell with the mode the window is actually in.
pub fn handle_window_mode(ctx: &mut UpdateContext<'_>, mode: window::Mode) {
    let fullscreen = mode == window::Mode::Fullscreen;
    if ctx.shell.is_fullscreen() != fullscreen {
        tracing::debug!(fullscreen, "window mode changed outside the player");
        ctx.shell.set_fullscreen(fullscreen);
    }
}

fn apply_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::SetFullscreen(fullscreen) => set_fullscreen(ctx, fullscreen),
        Effect::BookmarkAdded { index } => {
            if let Some(bookmark) = ctx.shell.bookmarks().get(index) {
                ctx.notifications.push(
                    Notification::info("notification-bookmark-added")
                        .with_arg("time", bookmark.display_text()),
                );
            }
            Task::none()
        }
        Effect::CaptureFailed(error) => {
            ctx.notifications
                .push(Notification::warning(error.i18n_key()));
            Task::none()
        }
        Effect::PlaybackFailed(error) => {
            ctx.notifications.push(playback_error_notification(
                &error,
                ctx.shell.current_track_name(),
            ));
            Task::none()
        }
    }
}

fn playback_error_notification(error: &Error, track: &str) -> Notification {
    let notification = Notification::error(error.i18n_key()).with_arg("track", track);
    match error {
        Error::Decode(reason) => notification.with_arg("reason", reason.as_str()),
        _ => notification,
    }
}

fn set_fullscreen(ctx: &mut UpdateContext<'_>, fullscreen: bool) -> Task<Message> {
    let Some(window_id) = *ctx.window_id else {
        tracing::debug!(fullscreen, "no window id yet, window mode unchanged");
        return Task::none();
    };
    ctx.shell.set_fullscreen(fullscreen);

    let mode = if fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(window_id, mode)
}
