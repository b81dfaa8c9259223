// SPDX-License-Identifier: MPL-2.0
//! Horizontal strip of captured bookmarks shown under the player.

use crate::i18n::fluent::I18n;
use crate::player::{BookmarkList, Intent};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, column, image, row, text, Column, Row, Scrollable};
use iced::{Alignment, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Renders the strip. Bookmarks appear in the order they were added.
pub fn view<'a>(ctx: ViewContext<'a>, bookmarks: &'a BookmarkList) -> Element<'a, Intent> {
    let count = bookmarks.len().to_string();
    let title = row![
        text(ctx.i18n.tr("bookmarks-title")).size(typography::BODY),
        text(
            ctx.i18n
                .tr_with_args("bookmarks-count", &[("count", count.as_str())])
        )
        .size(typography::CAPTION),
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    if bookmarks.is_empty() {
        return Column::new()
            .push(title)
            .push(text(ctx.i18n.tr("bookmarks-empty")).size(typography::CAPTION))
            .spacing(spacing::XXS)
            .padding(spacing::XS)
            .into();
    }

    let cards = bookmarks
        .iter()
        .enumerate()
        .fold(Row::new().spacing(spacing::XS), |row, (index, bookmark)| {
            let thumbnail = image(bookmark.thumbnail().handle().clone())
                .width(Length::Fixed(sizing::BOOKMARK_THUMB_WIDTH))
                .height(Length::Fixed(sizing::BOOKMARK_THUMB_HEIGHT));
            let card = column![thumbnail, text(bookmark.display_text()).size(typography::CAPTION)]
                .spacing(spacing::XXS)
                .align_x(Alignment::Center);
            row.push(
                button(card)
                    .on_press(Intent::JumpToBookmark(index))
                    .padding(spacing::XXS)
                    .style(styles::button::bookmark),
            )
        });

    let strip = Scrollable::new(cards)
        .direction(Direction::Horizontal(Scrollbar::new()))
        .width(Length::Fill);

    Column::new()
        .push(title)
        .push(strip)
        .spacing(spacing::XXS)
        .padding(spacing::XS)
        .into()
}
