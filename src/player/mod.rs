// SPDX-License-Identifier: MPL-2.0
//! Player domain: playback state, intents and the shell that reduces them.
//!
//! Nothing in this module renders or decodes. The [`Shell`] drives any
//! [`crate::media::MediaSurface`] and hands window-level work back to the
//! application as [`Effect`]s.

mod auto_hide;
mod bookmarks;
mod intent;
mod playback_rate;
mod seek_step;
mod shell;
pub mod shortcuts;
pub mod state;
pub mod time_format;
mod track_list;
mod volume;

pub use auto_hide::ControlsVisibility;
pub use bookmarks::{Bookmark, BookmarkList};
pub use intent::Intent;
pub use playback_rate::PlaybackRate;
pub use seek_step::SeekStep;
pub use shell::{Effect, Shell, TimeDisplay};
pub use state::PlayerState;
pub use track_list::TrackList;
pub use volume::Volume;
