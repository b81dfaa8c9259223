// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns the player shell, the latest decoded frame and the
//! toast manager, and translates messages into shell reductions and Iced
//! tasks. Player policy lives in [`crate::player`]; this module only wires
//! it to the window.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::i18n::fluent::I18n;
use crate::media::subscription::PlaybackSession;
use crate::media::surface::FfmpegSurface;
use crate::player::{Intent, Shell, TrackList};
use crate::ui::notifications::{self, Notification};
use crate::ui::video_canvas::VideoCanvas;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    shell: Shell<FfmpegSurface>,
    canvas: VideoCanvas<Intent>,
    window_id: Option<window::Id>,
    poll_interval: Duration,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("session", &self.shell.session())
            .field("track", &self.shell.current_source())
            .field("has_surface", &self.shell.has_surface())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 400;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; the flags are consumed once
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration and translations and starts on the first track.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.as_ref().map(PathBuf::from));
        let i18n = I18n::new(flags.lang.clone(), &config);

        let sources = if flags.tracks.is_empty() {
            config.tracks()
        } else {
            flags.tracks
        };
        let tracks = TrackList::new(sources).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to the sample playlist");
            TrackList::default()
        });
        tracing::info!(tracks = tracks.len(), "playlist ready");

        let mut app = App {
            i18n,
            shell: Shell::new(tracks, &config),
            canvas: VideoCanvas::new(),
            window_id: None,
            poll_interval: config.poll_interval(),
            notifications: notifications::Manager::new(),
        };

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        let track = self.shell.current_track_name();
        if track.is_empty() {
            self.i18n.tr("window-title")
        } else {
            self.i18n
                .tr_with_args("window-title-track", &[("track", track)])
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let poll_sub =
            subscription::create_poll_subscription(self.shell.has_surface(), self.poll_interval);
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());
        let playback_sub = subscription::create_playback_subscription(PlaybackSession {
            id: self.shell.session(),
            source: self.shell.current_source().to_string(),
        });

        Subscription::batch([event_sub, poll_sub, tick_sub, playback_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            shell: &mut self.shell,
            canvas: &mut self.canvas,
            notifications: &mut self.notifications,
            window_id: &mut self.window_id,
        };

        match message {
            Message::Player(intent) => update::handle_intent(&mut ctx, intent),
            Message::Playback(playback_message) => {
                update::handle_playback_message(&mut ctx, playback_message)
            }
            Message::PollTick(_instant) => {
                self.shell.poll();
                Task::none()
            }
            Message::Tick(_instant) => {
                self.notifications.tick();
                Task::none()
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::WindowModeChanged(mode) => {
                update::handle_window_mode(&mut ctx, mode);
                Task::none()
            }
            Message::RawEvent { window, event } => {
                update::handle_raw_event(&mut ctx, window, &event)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            shell: &self.shell,
            canvas: &self.canvas,
            notifications: &self.notifications,
        })
    }
}
