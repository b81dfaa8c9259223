// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for capture failures, decoder errors and config
//! warnings.
//!
//! - [`Notification`] carries a severity and an i18n message key
//! - [`Manager`] limits visible toasts and handles auto-dismiss
//! - [`Toast`] renders them in the bottom-right corner
//!
//! Message keys are resolved at render time, so toasts follow the active
//! locale.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
