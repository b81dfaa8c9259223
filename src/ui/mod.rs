// SPDX-License-Identifier: MPL-2.0
//! Iced widgets for the player window.

pub mod bookmark_strip;
pub mod design_tokens;
pub mod notifications;
pub mod player_view;
pub mod styles;
pub mod video_canvas;
pub mod video_controls;
