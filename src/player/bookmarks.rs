// SPDX-License-Identifier: MPL-2.0
//! Timestamp bookmarks with captured thumbnails.
//!
//! Bookmarks are immutable once created and the list is append-only: no
//! deduplication, no sorting, no removal. Insertion order is display order.

use super::time_format::format_time;
use crate::media::capture::Thumbnail;

/// A captured moment of the current track.
#[derive(Debug, Clone)]
pub struct Bookmark {
    timestamp_secs: f64,
    display_text: String,
    thumbnail: Thumbnail,
}

impl Bookmark {
    /// Creates a bookmark at `timestamp_secs`, labelled with its formatted time.
    #[must_use]
    pub fn new(timestamp_secs: f64, thumbnail: Thumbnail) -> Self {
        Self {
            timestamp_secs,
            display_text: format_time(timestamp_secs),
            thumbnail,
        }
    }

    #[must_use]
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_secs
    }

    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    #[must_use]
    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }
}

/// Append-only list of bookmarks for the session.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    entries: Vec<Bookmark>,
}

impl BookmarkList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bookmark and returns its index.
    pub fn push(&mut self, bookmark: Bookmark) -> usize {
        self.entries.push(bookmark);
        self.entries.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
