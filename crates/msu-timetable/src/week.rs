//! Week arithmetic for the day strip.
//!
//! All functions take an explicit `today`; nothing here reads the clock.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::TimetableError;
use crate::slot::DAYS_PER_WEEK;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Monday of the week containing `today`, or of the following week.
pub fn week_start(today: NaiveDate, next_week: bool) -> NaiveDate {
    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    if next_week {
        monday + Days::new(7)
    } else {
        monday
    }
}

/// The seven dates of the week, Monday first.
pub fn week_dates(today: NaiveDate, next_week: bool) -> Vec<NaiveDate> {
    let monday = week_start(today, next_week);
    (0..DAYS_PER_WEEK as u64)
        .map(|offset| monday + Days::new(offset))
        .collect()
}

/// [`week_dates`] formatted as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use msu_timetable::week::week_date_strings;
///
/// let sunday = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
/// let dates = week_date_strings(sunday, false);
/// assert_eq!(dates.first().map(String::as_str), Some("2026-10-19"));
/// assert_eq!(dates.last().map(String::as_str), Some("2026-10-25"));
/// ```
pub fn week_date_strings(today: NaiveDate, next_week: bool) -> Vec<String> {
    week_dates(today, next_week)
        .into_iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect()
}

/// 0-based day index of a date (0 = Monday).
pub fn day_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimetableError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| TimetableError::InvalidDate(format!("'{s}': {e}")))
}
