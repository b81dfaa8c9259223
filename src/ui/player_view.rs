// SPDX-License-Identifier: MPL-2.0
//! The player pane: video, loading badge and auto-hiding controls.

use super::video_canvas::VideoCanvas;
use super::video_controls::{self, ControlsState};
use crate::i18n::fluent::I18n;
use crate::player::{Intent, PlayerState};
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{column, container, mouse_area, text, Container, Stack};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Everything the pane needs to render, borrowed from the application.
pub struct PaneModel<'a> {
    pub canvas: &'a VideoCanvas<Intent>,
    pub player: &'a PlayerState,
    pub controls_visible: bool,
    pub position_label: String,
    pub duration_label: String,
    pub fullscreen: bool,
    pub can_bookmark: bool,
}

/// Full-size player with the controls overlaid at the bottom.
pub fn view<'a>(ctx: ViewContext<'a>, model: PaneModel<'a>) -> Element<'a, Intent> {
    let mut stack = Stack::new()
        .push(model.canvas.view())
        .width(Length::Fill)
        .height(Length::Fill);

    if model.player.is_loading() {
        stack = stack.push(loading_badge(ctx.i18n));
    }

    if model.controls_visible {
        let controls = video_controls::view(
            video_controls::ViewContext { i18n: ctx.i18n },
            ControlsState {
                player: model.player,
                position_label: model.position_label,
                duration_label: model.duration_label,
                fullscreen: model.fullscreen,
                can_bookmark: model.can_bookmark,
            },
        );
        stack = stack.push(
            Container::new(controls)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(alignment::Vertical::Bottom),
        );
    }

    mouse_area(stack)
        .on_move(|_| Intent::PointerMoved)
        .into()
}

/// Small floating pane used while minimized. Playback keeps running.
pub fn view_minimized<'a>(
    ctx: ViewContext<'a>,
    canvas: &'a VideoCanvas<Intent>,
    player: &'a PlayerState,
) -> Element<'a, Intent> {
    let mut video = Stack::new()
        .push(canvas.view())
        .width(Length::Fill)
        .height(Length::Fill);
    if player.is_loading() {
        video = video.push(loading_badge(ctx.i18n));
    }

    let pane = container(
        column![
            video,
            video_controls::view_compact(video_controls::ViewContext { i18n: ctx.i18n }, player)
        ]
        .spacing(spacing::XXS),
    )
    .width(Length::Fixed(sizing::MINIMIZED_PANE_WIDTH))
    .height(Length::Fixed(sizing::MINIMIZED_PANE_HEIGHT + sizing::BUTTON_HEIGHT))
    .padding(spacing::XXS)
    .style(styles::overlay::minimized_pane);

    Container::new(pane)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}

fn loading_badge<'a>(i18n: &I18n) -> Element<'a, Intent> {
    let badge = container(text(i18n.tr("player-loading")).size(typography::BODY))
        .padding(spacing::SM)
        .style(styles::overlay::indicator(radius::MD));

    Container::new(badge)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
