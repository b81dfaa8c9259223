// SPDX-License-Identifier: MPL-2.0
//! Fixed playlist of media sources with wrapping navigation.

use crate::config::DEFAULT_TRACKS;
use crate::error::{Error, Result};

/// Ordered, read-only list of media sources.
///
/// Always holds at least one track, so the current index is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackList {
    tracks: Vec<String>,
}

impl TrackList {
    /// Builds a track list, rejecting an empty playlist.
    pub fn new(tracks: Vec<String>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::Config("playlist has no tracks".to_string()));
        }
        Ok(Self { tracks })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns the source at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tracks.get(index).map(String::as_str)
    }

    /// Index after `index`, wrapping from the last track to the first.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping from the first track to the last.
    #[must_use]
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }

    /// Short display name for the track: the last path segment of the
    /// source, without query string.
    #[must_use]
    pub fn display_name(&self, index: usize) -> Option<&str> {
        self.get(index).map(|source| {
            let without_query = source.split(['?', '#']).next().unwrap_or(source);
            without_query
                .rsplit(['/', '\\'])
                .find(|segment| !segment.is_empty())
                .unwrap_or(without_query)
        })
    }
}

impl Default for TrackList {
    /// The built-in sample playlist.
    fn default() -> Self {
        Self {
            tracks: DEFAULT_TRACKS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrackList {
        TrackList::new(DEFAULT_TRACKS.iter().map(|s| (*s).to_string()).collect())
            .expect("default playlist is not empty")
    }

    #[test]
    fn default_is_the_sample_playlist() {
        assert_eq!(TrackList::default(), sample());
    }

    #[test]
    fn empty_playlist_is_rejected() {
        assert!(matches!(TrackList::new(Vec::new()), Err(Error::Config(_))));
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let tracks = sample();
        assert_eq!(tracks.len(), 4);
        assert_eq!(tracks.next_index(0), 1);
        assert_eq!(tracks.next_index(3), 0);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let tracks = sample();
        assert_eq!(tracks.previous_index(0), 3);
        assert_eq!(tracks.previous_index(2), 1);
    }

    #[test]
    fn single_track_wraps_onto_itself() {
        let tracks = TrackList::new(vec!["clip.mp4".to_string()]).unwrap();
        assert_eq!(tracks.next_index(0), 0);
        assert_eq!(tracks.previous_index(0), 0);
    }

    #[test]
    fn display_name_uses_last_segment() {
        let tracks = TrackList::new(vec![
            "https://example.com/videos/intro.mp4?token=abc".to_string(),
            "/home/user/clip.mkv".to_string(),
            "plain.webm".to_string(),
        ])
        .unwrap();
        assert_eq!(tracks.display_name(0), Some("intro.mp4"));
        assert_eq!(tracks.display_name(1), Some("clip.mkv"));
        assert_eq!(tracks.display_name(2), Some("plain.webm"));
        assert_eq!(tracks.display_name(3), None);
    }
}
