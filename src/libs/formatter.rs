//! Hour formatting for reports and terminal output.
//!
//! Aggregated hours are decimal (`4.25`), which is what the CSV and Excel
//! outputs carry. The terminal view adds a clock-style `HH:MM` rendering
//! next to it because that is how people usually read logged time.
//!
//! ```rust
//! use jira_timelogs::libs::formatter::{format_hours, format_hours_hm};
//!
//! assert_eq!(format_hours(4.0), "4.00");
//! assert_eq!(format_hours_hm(4.25), "04:15");
//! ```

use chrono::Duration;

/// Decimal hours with exactly two fractional digits.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Decimal hours as `HH:MM`, rounded to the nearest minute.
///
/// Negative input renders as `00:00`; hours beyond 99 simply widen the
/// hour field.
pub fn format_hours_hm(hours: f64) -> String {
    let minutes = (hours * 60.0).round().max(0.0) as i64;
    format_duration(&Duration::minutes(minutes))
}

/// `chrono::Duration` as `HH:MM`.
pub fn format_duration(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
