// SPDX-License-Identifier: MPL-2.0
//! Shared widget styles for the player.

pub mod button;
pub mod overlay;
