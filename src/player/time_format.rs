// SPDX-License-Identifier: MPL-2.0
//! Timestamp formatting for the time display and bookmark labels.

/// Formats a position in seconds as `MM:SS`, or `H:MM:SS` past the hour.
///
/// Minutes are always two digits, so 65 seconds reads `01:05` rather than
/// `1:05`. Hours are not taken modulo 24: a 25 hour stream reads
/// `25:00:00`. Non-finite input (an unknown duration) renders as `00:00`
/// and negative input is clamped to zero.
///
/// ```
/// use framemark::player::time_format::format_time;
///
/// assert_eq!(format_time(f64::NAN), "00:00");
/// assert_eq!(format_time(65.0), "01:05");
/// assert_eq!(format_time(3661.0), "1:01:01");
/// ```
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "00:00".to_string();
    }
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Formats the time left as `-MM:SS` (or `-H:MM:SS`).
#[must_use]
pub fn format_remaining(current_secs: f64, duration_secs: f64) -> String {
    format!("-{}", format_time(duration_secs - current_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_handles_nan() {
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn format_time_handles_zero() {
        assert_eq!(format_time(0.0), "00:00");
    }

    #[test]
    fn format_time_pads_minutes_without_hours() {
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(599.9), "09:59");
    }

    #[test]
    fn format_time_shows_unpadded_hours() {
        assert_eq!(format_time(3661.0), "1:01:01");
        assert_eq!(format_time(36_000.0), "10:00:00");
    }

    #[test]
    fn format_time_does_not_wrap_at_a_day() {
        assert_eq!(format_time(90_000.0), "25:00:00");
    }

    #[test]
    fn format_time_handles_negative() {
        assert_eq!(format_time(-10.0), "00:00");
    }

    #[test]
    fn format_remaining_prefixes_minus() {
        assert_eq!(format_remaining(30.0, 95.0), "-01:05");
        assert_eq!(format_remaining(0.0, f64::NAN), "-00:00");
    }
}
