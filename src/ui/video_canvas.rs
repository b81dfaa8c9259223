// SPDX-License-Identifier: MPL-2.0
//! Widget for rendering decoded video frames.

use crate::media::Frame;
use crate::ui::design_tokens::palette;
use iced::widget::{container, image, Container};
use iced::{ContentFit, Element, Length};
use std::marker::PhantomData;
use std::sync::Arc;

/// Holds the image handle of the most recent frame.
///
/// A new handle is created per frame; Iced uploads it on the next draw.
#[derive(Debug)]
pub struct VideoCanvas<Message> {
    frame_handle: Option<image::Handle>,
    width: u32,
    height: u32,
    _phantom: PhantomData<Message>,
}

impl<Message> VideoCanvas<Message> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_handle: None,
            width: 0,
            height: 0,
            _phantom: PhantomData,
        }
    }

    /// Replaces the displayed frame. Malformed frames are ignored.
    pub fn set_frame(&mut self, frame: &Frame) {
        if !frame.is_well_formed() {
            tracing::debug!(
                width = frame.width,
                height = frame.height,
                "ignoring malformed frame"
            );
            return;
        }
        let data = Arc::clone(&frame.rgba_data);
        let data = Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone());
        self.frame_handle = Some(image::Handle::from_rgba(frame.width, frame.height, data));
        self.width = frame.width;
        self.height = frame.height;
    }

    /// Drops the frame, e.g. when switching tracks.
    pub fn clear(&mut self) {
        self.frame_handle = None;
        self.width = 0;
        self.height = 0;
    }

    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.frame_handle.is_some()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Renders the frame letterboxed into the available space.
    pub fn view(&self) -> Element<'_, Message>
    where
        Message: 'static,
    {
        let content: Element<'_, Message> = match &self.frame_handle {
            Some(handle) => image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => iced::widget::text("").into(),
        };

        let backdrop: Container<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme: &iced::Theme| container::Style {
                background: Some(palette::BLACK.into()),
                ..Default::default()
            });
        backdrop.into()
    }
}

impl<Message> Default for VideoCanvas<Message> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> Frame {
        Frame {
            rgba_data: Arc::new(vec![0u8; (width * height * 4) as usize]),
            width,
            height,
            pts_secs: 0.0,
        }
    }

    #[test]
    fn new_canvas_starts_empty() {
        let canvas: VideoCanvas<()> = VideoCanvas::new();
        assert!(!canvas.has_frame());
        assert_eq!(canvas.dimensions(), (0, 0));
    }

    #[test]
    fn set_frame_updates_dimensions() {
        let mut canvas: VideoCanvas<()> = VideoCanvas::new();
        canvas.set_frame(&frame(64, 36));
        assert!(canvas.has_frame());
        assert_eq!(canvas.dimensions(), (64, 36));
    }

    #[test]
    fn malformed_frame_is_ignored() {
        let mut canvas: VideoCanvas<()> = VideoCanvas::new();
        canvas.set_frame(&Frame {
            rgba_data: Arc::new(vec![0u8; 3]),
            ..frame(4, 4)
        });
        assert!(!canvas.has_frame());
    }

    #[test]
    fn clear_releases_frame() {
        let mut canvas: VideoCanvas<()> = VideoCanvas::new();
        canvas.set_frame(&frame(8, 8));
        canvas.clear();
        assert!(!canvas.has_frame());
    }
}
