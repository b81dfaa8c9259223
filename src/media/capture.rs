// SPDX-License-Identifier: MPL-2.0
//! Thumbnail capture for bookmarks.
//!
//! A frame is scaled to a fixed 160×90 bitmap (stretched, not letterboxed),
//! encoded as PNG and kept both as a `data:` URI and as an Iced image handle
//! for display.

use super::Frame;
use crate::config::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use iced::widget::image;
use image_rs::imageops::{self, FilterType};
use image_rs::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// An encoded bookmark thumbnail.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    data_uri: String,
    handle: image::Handle,
}

impl Thumbnail {
    /// Scales an RGBA buffer of any size down to a thumbnail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureFailed`] if the buffer does not match the
    /// dimensions or PNG encoding fails.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let source = ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).ok_or_else(|| {
            Error::CaptureFailed(format!("pixel buffer does not match {width}x{height}"))
        })?;
        let scaled = imageops::resize(
            &source,
            THUMBNAIL_WIDTH,
            THUMBNAIL_HEIGHT,
            FilterType::Triangle,
        );

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(scaled.clone())
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(Self {
            width: THUMBNAIL_WIDTH,
            height: THUMBNAIL_HEIGHT,
            data_uri: format!("{DATA_URI_PREFIX}{}", STANDARD.encode(&png)),
            handle: image::Handle::from_rgba(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, scaled.into_raw()),
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// PNG thumbnail as a `data:image/png;base64,` URI.
    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Image handle for rendering.
    #[must_use]
    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }
}

/// Captures a thumbnail of `frame`.
///
/// # Errors
///
/// Returns [`Error::CaptureFailed`] for an empty or malformed frame.
pub fn capture_thumbnail(frame: &Frame) -> Result<Thumbnail> {
    if !frame.is_well_formed() {
        return Err(Error::CaptureFailed(format!(
            "frame of {}x{} has {} bytes",
            frame.width,
            frame.height,
            frame.rgba_data.len()
        )));
    }
    Thumbnail::from_rgba(frame.width, frame.height, (*frame.rgba_data).clone())
}
