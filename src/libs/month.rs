//! Month selection: `YYYY-MM` validation and calendar month ranges.
//!
//! The report always covers one whole calendar month. The month comes either
//! from the `--date YYYY-MM` flag, validated by [`MonthSpec::validate`], or
//! from the local clock when the flag is absent.
//!
//! ```rust
//! use jira_timelogs::libs::month::{month_range, MonthSpec};
//!
//! let spec = MonthSpec::validate_with_year(Some("2024-02"), 2024)?.unwrap();
//! let range = month_range(Some(spec.year), Some(spec.month))?;
//! assert_eq!(range.end.to_string(), "2024-02-29");
//! # Ok::<(), jira_timelogs::libs::month::MonthSpecError>(())
//! ```

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use thiserror::Error;

/// Earliest year accepted by the validator.
pub const MIN_YEAR: i32 = 2000;

/// Reasons a month specifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthSpecError {
    #[error("Invalid date format '{0}'. Please use YYYY-MM format (e.g., 2024-03)")]
    InvalidFormat(String),
    #[error("Year {year} is out of range. Year must be between {min} and {max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("Month {0} is out of range. Month must be between 01 and 12")]
    MonthOutOfRange(u32),
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthSpec {
    pub year: i32,
    pub month: u32,
}

impl MonthSpec {
    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Validates an optional `YYYY-MM` string against the current local year.
    ///
    /// `None` is not an error: it means "no month given" and yields `Ok(None)`
    /// so the caller can fall back to [`MonthSpec::current`].
    pub fn validate(spec: Option<&str>) -> Result<Option<Self>, MonthSpecError> {
        Self::validate_with_year(spec, Local::now().year())
    }

    /// Validates an optional `YYYY-MM` string.
    ///
    /// The year must lie in `[2000, current_year + 1]` and the month in
    /// `[1, 12]`. The format is strict: four digits, a dash, two digits.
    ///
    /// # Errors
    ///
    /// - [`MonthSpecError::InvalidFormat`] for anything that is not exactly
    ///   `DDDD-DD` (empty strings, `2024-3`, `2024/03`, `2024`, ...)
    /// - [`MonthSpecError::YearOutOfRange`] with both bounds attached
    /// - [`MonthSpecError::MonthOutOfRange`] for `00` or `13` and above
    pub fn validate_with_year(spec: Option<&str>, current_year: i32) -> Result<Option<Self>, MonthSpecError> {
        let Some(raw) = spec else {
            return Ok(None);
        };

        let invalid = || MonthSpecError::InvalidFormat(raw.to_string());
        let (year_part, month_part) = raw.split_once('-').ok_or_else(invalid)?;
        if !is_digits(year_part, 4) || !is_digits(month_part, 2) {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;

        let max = current_year + 1;
        if !(MIN_YEAR..=max).contains(&year) {
            return Err(MonthSpecError::YearOutOfRange { year, min: MIN_YEAR, max });
        }
        if !(1..=12).contains(&month) {
            return Err(MonthSpecError::MonthOutOfRange(month));
        }

        Ok(Some(Self { year, month }))
    }

    /// Inclusive range of days covered by this month.
    pub fn range(&self) -> Result<DateRange, MonthSpecError> {
        DateRange::for_month(self.year, self.month)
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

/// First and last day of a calendar month, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds the range for `year`/`month`.
    ///
    /// The month is not checked against any business rule here, but a value
    /// that cannot form a calendar date is reported instead of panicking.
    pub fn for_month(year: i32, month: u32) -> Result<Self, MonthSpecError> {
        if !(1..=12).contains(&month) {
            return Err(MonthSpecError::MonthOutOfRange(month));
        }
        let out_of_range = || MonthSpecError::YearOutOfRange {
            year,
            min: NaiveDate::MIN.year(),
            max: NaiveDate::MAX.year(),
        };
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).ok_or_else(out_of_range)?;
        Ok(Self { start, end })
    }

    /// `true` when `date` falls inside the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Resolves the date range for a month, defaulting to the current one.
///
/// When either argument is missing both fall back to today's year and month;
/// the clock is read exactly once.
pub fn month_range(year: Option<i32>, month: Option<u32>) -> Result<DateRange, MonthSpecError> {
    match (year, month) {
        (Some(year), Some(month)) => DateRange::for_month(year, month),
        _ => MonthSpec::current().range(),
    }
}

/// Gregorian leap year: every fourth year, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`. `month` must be in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
