//! The clock seam.
//!
//! Every "today" comparison and every timestamp written by the storage layer
//! goes through a [`Clock`], so tests can move the calendar forward without
//! waiting for midnight.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Source of the current instant and calendar date.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// The calendar date tasks are compared against.
    fn today(&self) -> NaiveDate;
}

/// Wall clock using the local time zone for calendar dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
///
/// Calendar dates are derived from the current instant in UTC.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Start at the given instant.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Start at noon UTC on `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .map_or(0, |dt| dt.and_utc().timestamp_millis());
        Self::from_millis(noon)
    }

    /// Move forward by `millis`.
    pub fn advance_millis(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Move forward by whole days.
    pub fn advance_days(&self, days: i64) {
        self.advance_millis(Duration::days(days).num_milliseconds());
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_millis())
            .map_or(NaiveDate::MIN, |dt| dt.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_noon() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let clock = ManualClock::at_date(date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_manual_clock_advance_days() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let clock = ManualClock::at_date(date);
        let before = clock.now_millis();

        clock.advance_days(1);

        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(clock.now_millis() - before, 86_400_000);
    }

    #[test]
    fn test_manual_clock_advance_millis_keeps_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let clock = ManualClock::at_date(date);
        clock.advance_millis(1_000);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
