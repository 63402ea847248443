//! Calendar date helpers.
//!
//! Task due-dates are stored as `YYYY-MM-DD` text so that lexicographic
//! comparison in SQL matches calendar order.

use chrono::{Duration, NaiveDate};

use super::traits::{Clock, SystemClock};

/// Storage format for task dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local calendar date as a storage string.
#[must_use]
pub fn today() -> String {
    today_in(&SystemClock)
}

/// The calendar date of `clock` as a storage string.
#[must_use]
pub fn today_in(clock: &dyn Clock) -> String {
    format_date(clock.today())
}

/// Format a date in the storage format.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` string.
#[must_use]
pub fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parse a user-entered date relative to `today`.
///
/// Supports:
/// - `today`, `tomorrow`, `yesterday`
/// - `in 3 days`, `in 2 weeks`
/// - `2024-12-15` (ISO format)
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_date_input(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {},
    }

    if let Some(date) = parse_relative_offset(&input, today) {
        return Some(date);
    }

    parse_stored_date(&input)
}

/// Parse "in X days/weeks" patterns.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 3 || parts[0] != "in" {
        return None;
    }

    let amount: i64 = parts[1].parse().ok()?;
    let days = match parts[2].trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    today.checked_add_signed(Duration::try_days(days)?)
}
