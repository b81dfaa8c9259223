// SPDX-License-Identifier: MPL-2.0
//! Rewind/fast-forward step domain type.

use crate::config::{DEFAULT_SEEK_STEP_SECS, MAX_SEEK_STEP_SECS, MIN_SEEK_STEP_SECS};

/// Seconds skipped by rewind and fast-forward, clamped to
/// [`MIN_SEEK_STEP_SECS`]..=[`MAX_SEEK_STEP_SECS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep(f64);

impl SeekStep {
    /// Creates a new seek step, clamping to valid range.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        if !secs.is_finite() {
            return Self::default();
        }
        Self(secs.clamp(MIN_SEEK_STEP_SECS, MAX_SEEK_STEP_SECS))
    }

    /// Returns the step in seconds.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SeekStep {
    fn default() -> Self {
        Self(DEFAULT_SEEK_STEP_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_abs_diff_eq!(SeekStep::new(0.0).value(), MIN_SEEK_STEP_SECS);
        assert_abs_diff_eq!(SeekStep::new(600.0).value(), MAX_SEEK_STEP_SECS);
        assert_abs_diff_eq!(SeekStep::new(5.0).value(), 5.0);
    }

    #[test]
    fn default_is_ten_seconds() {
        assert_abs_diff_eq!(SeekStep::default().value(), 10.0);
        assert_abs_diff_eq!(SeekStep::new(f64::NAN).value(), 10.0);
    }
}
