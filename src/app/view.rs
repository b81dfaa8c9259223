// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::media::surface::FfmpegSurface;
use crate::player::{Intent, Shell};
use crate::ui::notifications::{self, Toast};
use crate::ui::video_canvas::VideoCanvas;
use crate::ui::{bookmark_strip, player_view};
use iced::widget::{Column, Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub shell: &'a Shell<FfmpegSurface>,
    pub canvas: &'a VideoCanvas<Intent>,
    pub notifications: &'a notifications::Manager,
}

/// Renders the player, the bookmark strip and the toast overlay.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content = if ctx.shell.state().is_minimized() {
        view_minimized(&ctx)
    } else {
        view_full(&ctx)
    };

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(content)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_full<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let shell = ctx.shell;
    let player = player_view::view(
        player_view::ViewContext { i18n: ctx.i18n },
        player_view::PaneModel {
            canvas: ctx.canvas,
            player: shell.state(),
            controls_visible: shell.visibility().is_visible(),
            position_label: shell.position_label(),
            duration_label: shell.duration_label(),
            fullscreen: shell.is_fullscreen(),
            can_bookmark: shell.has_surface(),
        },
    );

    // Fullscreen shows the video alone
    if shell.is_fullscreen() {
        return player.map(Message::Player);
    }

    let strip = bookmark_strip::view(
        bookmark_strip::ViewContext { i18n: ctx.i18n },
        shell.bookmarks(),
    );

    let layout: Element<'a, Intent> = Column::new()
        .push(Container::new(player).width(Length::Fill).height(Length::Fill))
        .push(strip)
        .width(Length::Fill)
        .height(Length::Fill)
        .into();
    layout.map(Message::Player)
}

fn view_minimized<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let shell = ctx.shell;
    let strip = bookmark_strip::view(
        bookmark_strip::ViewContext { i18n: ctx.i18n },
        shell.bookmarks(),
    );
    let pane = player_view::view_minimized(
        player_view::ViewContext { i18n: ctx.i18n },
        ctx.canvas,
        shell.state(),
    );

    let layout: Element<'a, Intent> = Stack::new()
        .push(Container::new(strip).width(Length::Fill).height(Length::Fill))
        .push(pane)
        .width(Length::Fill)
        .height(Length::Fill)
        .into();
    layout.map(Message::Player)
}
