// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! Translation files are embedded at build time from `assets/i18n/`.
//!
//! # Features
//!
//! - Locale resolution from CLI, config, or system settings
//! - Message arguments through [`fluent::I18n::tr_with_args`]
//! - `MISSING: key` placeholder when a message is not translated

pub mod fluent;
