// SPDX-License-Identifier: MPL-2.0
//! `framemark` is a video player with timestamp bookmarks, built with Iced.
//!
//! The crate is split so the player logic can be exercised without a window:
//!
//! - [`player`] - playback state, intents and the [`player::Shell`] reducer
//! - [`media`] - the [`media::MediaSurface`] contract and its FFmpeg backend
//! - [`ui`] - Iced widgets for the controls, bookmark strip and toasts
//! - [`app`] - the Iced application wiring everything together
//! - [`config`], [`i18n`], [`error`] - ambient support

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod player;
pub mod ui;

#[cfg(test)]
mod test_utils;
