// SPDX-License-Identifier: MPL-2.0
//! Video playback controls.
//!
//! Renders the transport buttons, the seek and volume sliders, the time
//! label and the playback-rate picker. Every widget emits a
//! [`Intent`]; nothing here mutates state.

use crate::i18n::fluent::I18n;
use crate::player::{Intent, PlaybackRate, PlayerState, Volume};
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, container, row, slider, text, tooltip, Row, Text};
use iced::{Alignment, Element, Length};

/// Seek slider resolution, as a fraction of the duration.
const SEEK_SLIDER_STEP: f64 = 0.001;

/// Volume slider works in percent.
const VOLUME_SLIDER_STEP: f32 = 1.0;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// What the controls display, snapshotted from the shell.
#[derive(Debug, Clone)]
pub struct ControlsState<'a> {
    pub player: &'a PlayerState,
    /// Elapsed or remaining time, already formatted.
    pub position_label: String,
    pub duration_label: String,
    pub fullscreen: bool,
    pub can_bookmark: bool,
}

/// Renders the full controls bar.
pub fn view<'a>(ctx: ViewContext<'a>, state: ControlsState<'a>) -> Element<'a, Intent> {
    let player = state.player;

    let seek = slider(0.0..=1.0, player.played_fraction(), Intent::SeekPreview)
        .on_release(Intent::SeekCommit)
        .step(SEEK_SLIDER_STEP)
        .width(Length::Fill);

    let time_toggle = button(
        text(format!("{} / {}", state.position_label, state.duration_label))
            .size(typography::CAPTION),
    )
    .on_press(Intent::ToggleTimeDisplay)
    .padding(spacing::XXS)
    .style(overlay_style());

    let timeline = row![seek, time_toggle]
        .spacing(spacing::XS)
        .align_y(Alignment::Center);

    let transport = row![
        control_button(ctx.i18n, "controls-previous", "shortcut-previous", Intent::PreviousTrack),
        control_button(ctx.i18n, "controls-rewind", "shortcut-rewind", Intent::Rewind),
        control_button(
            ctx.i18n,
            if player.is_playing() {
                "controls-pause"
            } else {
                "controls-play"
            },
            "shortcut-play-pause",
            Intent::TogglePlayback,
        ),
        control_button(
            ctx.i18n,
            "controls-fast-forward",
            "shortcut-fast-forward",
            Intent::FastForward
        ),
        control_button(ctx.i18n, "controls-next", "shortcut-next", Intent::NextTrack),
    ]
    .spacing(spacing::XXS)
    .align_y(Alignment::Center);

    let bookmark: Element<'a, Intent> = if state.can_bookmark {
        control_button(ctx.i18n, "controls-bookmark", "shortcut-bookmark", Intent::AddBookmark)
    } else {
        button(Text::new(ctx.i18n.tr("controls-bookmark")).size(typography::CAPTION))
            .padding(spacing::XS)
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(overlay_style())
            .into()
    };

    let trailing = row![
        volume_controls(ctx.i18n, player),
        rate_picker(player.playback_rate()),
        bookmark,
        control_button(
            ctx.i18n,
            "controls-minimize",
            "shortcut-minimize",
            Intent::ToggleMinimize
        ),
        control_button(
            ctx.i18n,
            if state.fullscreen {
                "controls-exit-fullscreen"
            } else {
                "controls-fullscreen"
            },
            "shortcut-fullscreen",
            Intent::ToggleFullscreen,
        ),
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    let buttons = row![transport, iced::widget::Space::new().width(Length::Fill), trailing]
        .align_y(Alignment::Center);

    container(column![timeline, buttons].spacing(spacing::XXS))
        .width(Length::Fill)
        .padding(spacing::XS)
        .style(styles::overlay::controls_container)
        .into()
}

/// Compact controls for the minimized pane: play/pause and restore.
pub fn view_compact<'a>(ctx: ViewContext<'a>, player: &'a PlayerState) -> Element<'a, Intent> {
    row![
        control_button(
            ctx.i18n,
            if player.is_playing() {
                "controls-pause"
            } else {
                "controls-play"
            },
            "shortcut-play-pause",
            Intent::TogglePlayback,
        ),
        iced::widget::Space::new().width(Length::Fill),
        control_button(ctx.i18n, "controls-restore", "shortcut-minimize", Intent::ToggleMinimize),
    ]
    .spacing(spacing::XXS)
    .padding(spacing::XXS)
    .align_y(Alignment::Center)
    .into()
}

fn volume_controls<'a>(i18n: &I18n, player: &PlayerState) -> Row<'a, Intent> {
    let mute_label = if player.is_muted() {
        i18n.tr("controls-unmute")
    } else {
        i18n.tr("controls-mute")
    };
    let mute_button = button(Text::new(mute_label).size(typography::CAPTION))
        .on_press(Intent::ToggleMute)
        .padding(spacing::XS)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT));
    let mute_button: Element<'a, Intent> = if player.is_muted() {
        mute_button.style(styles::button::selected).into()
    } else {
        mute_button.style(overlay_style()).into()
    };

    let volume_slider = slider(0.0..=100.0, player.volume().as_percent(), |percent| {
        Intent::SetVolume(Volume::from_percent(percent))
    })
    .on_release(Intent::CommitVolume)
    .step(VOLUME_SLIDER_STEP)
    .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH));

    row![mute_button, volume_slider]
        .spacing(spacing::XXS)
        .align_y(Alignment::Center)
}

/// One button per allowed rate, the current one highlighted.
fn rate_picker<'a>(current: PlaybackRate) -> Row<'a, Intent> {
    PlaybackRate::all().fold(Row::new().spacing(spacing::XXS), |picker, rate| {
        let entry = button(Text::new(rate.to_string()).size(typography::CAPTION))
            .on_press(Intent::SetPlaybackRate(rate))
            .padding(spacing::XXS);
        let entry = if rate == current {
            entry.style(styles::button::selected)
        } else {
            entry.style(overlay_style())
        };
        picker.push(entry)
    })
}

fn control_button<'a>(
    i18n: &I18n,
    label_key: &str,
    shortcut_key: &str,
    intent: Intent,
) -> Element<'a, Intent> {
    let content: Element<'a, Intent> =
        button(Text::new(i18n.tr(label_key)).size(typography::CAPTION))
            .on_press(intent)
            .padding(spacing::XS)
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(overlay_style())
            .into();

    tooltip(content, Text::new(i18n.tr(shortcut_key)), tooltip::Position::Top)
        .gap(spacing::XXS)
        .into()
}

fn overlay_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    styles::button::overlay(
        palette::WHITE,
        opacity::OVERLAY_MEDIUM,
        opacity::OVERLAY_HOVER,
    )
}
