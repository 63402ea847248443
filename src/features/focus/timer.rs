//! Countdown timer for focus sessions.
//!
//! Provides the countdown state machine plus duration parsing/formatting.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Milliseconds removed by one tick of the display loop.
pub const DEFAULT_TICK_MILLIS: i64 = 1_000;

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Set up but never started
    Idle,
    /// Counting down
    Running,
    /// Reached zero
    Finished,
}

/// What happened to a session when the timer was reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    /// Planned length in milliseconds.
    pub planned_ms: i64,
    /// Time actually spent, `planned - remaining`.
    pub elapsed_ms: i64,
    /// Whether the countdown reached zero.
    pub completed: bool,
}

/// A countdown timer measured in milliseconds.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    planned_ms: i64,
    remaining_ms: i64,
    state: TimerState,
}

impl FocusTimer {
    /// Create an idle timer for the given duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        let planned_ms = duration.num_milliseconds().max(0);
        Self {
            planned_ms,
            remaining_ms: planned_ms,
            state: TimerState::Idle,
        }
    }

    /// Create a timer from hours, minutes and seconds, the way the picker
    /// collects them.
    #[must_use]
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self::new(Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds))
    }

    /// Start the countdown.
    ///
    /// Returns false if there is nothing to count down or the timer already
    /// ran.
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle || self.planned_ms == 0 {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Advance the countdown by `step_ms`.
    ///
    /// Returns true if the timer just reached zero.
    pub fn tick(&mut self, step_ms: i64) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.remaining_ms = (self.remaining_ms - step_ms.max(0)).max(0);

        if self.remaining_ms == 0 {
            self.state = TimerState::Finished;
            true
        } else {
            false
        }
    }

    /// Stop the timer and hand back the session, if one was started.
    ///
    /// The timer returns to idle with its original duration. A timer that
    /// was never started yields `None`.
    pub fn reset(&mut self) -> Option<SessionOutcome> {
        let outcome = match self.state {
            TimerState::Idle => None,
            TimerState::Running | TimerState::Finished => Some(SessionOutcome {
                planned_ms: self.planned_ms,
                elapsed_ms: self.elapsed_ms(),
                completed: self.state == TimerState::Finished,
            }),
        };

        self.remaining_ms = self.planned_ms;
        self.state = TimerState::Idle;
        outcome
    }

    /// Planned length in milliseconds.
    #[must_use]
    pub const fn planned_ms(&self) -> i64 {
        self.planned_ms
    }

    /// Remaining milliseconds.
    #[must_use]
    pub const fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    /// Elapsed milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> i64 {
        self.planned_ms - self.remaining_ms
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Check if the timer is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Format remaining time as HH:MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_clock(Duration::milliseconds(self.remaining_ms))
    }
}

/// Format a duration as HH:MM:SS.
#[must_use]
pub fn format_clock(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is taken as minutes. Zero, garbage and lengths too large
/// to represent all yield `None`.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return if minutes > 0 {
            Duration::try_minutes(minutes)
        } else {
            None
        };
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let seconds = match c {
                'h' => num.checked_mul(3600)?,
                'm' => num.checked_mul(60)?,
                's' => num,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(seconds)?;
        } else if !c.is_whitespace() {
            return None;
        }
    }

    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Duration::try_seconds(total_seconds)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_new_is_idle() {
        let timer = FocusTimer::from_hms(0, 25, 0);
        assert_eq!(timer.planned_ms(), 25 * 60_000);
        assert_eq!(timer.remaining_ms(), timer.planned_ms());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_timer_counts_down_to_finish() {
        let mut timer = FocusTimer::from_hms(0, 0, 3);
        assert!(timer.start());

        assert!(!timer.tick(DEFAULT_TICK_MILLIS));
        assert!(!timer.tick(DEFAULT_TICK_MILLIS));
        assert!(timer.is_running());
        assert!(timer.tick(DEFAULT_TICK_MILLIS));
        assert_eq!(timer.state(), TimerState::Finished);

        // Further ticks are ignored.
        assert!(!timer.tick(DEFAULT_TICK_MILLIS));
        assert_eq!(timer.remaining_ms(), 0);
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut timer = FocusTimer::new(Duration::milliseconds(1_500));
        timer.start();
        timer.tick(1_000);
        assert!(timer.tick(1_000));
        assert_eq!(timer.remaining_ms(), 0);
        assert_eq!(timer.elapsed_ms(), 1_500);
    }

    #[test]
    fn test_reset_finished_reports_full_session() {
        let mut timer = FocusTimer::from_hms(0, 0, 2);
        timer.start();
        timer.tick(1_000);
        timer.tick(1_000);

        let outcome = timer.reset().unwrap();
        assert_eq!(outcome.elapsed_ms, 2_000);
        assert!(outcome.completed);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_ms(), 2_000);
    }

    #[test]
    fn test_reset_midway_reports_partial_session() {
        let mut timer = FocusTimer::from_hms(0, 1, 0);
        timer.start();
        for _ in 0..20 {
            timer.tick(DEFAULT_TICK_MILLIS);
        }

        let outcome = timer.reset().unwrap();
        assert_eq!(outcome.planned_ms, 60_000);
        assert_eq!(outcome.elapsed_ms, 20_000);
        assert!(!outcome.completed);
    }

    #[test]
    fn test_reset_without_start_records_nothing() {
        let mut timer = FocusTimer::from_hms(0, 25, 0);
        assert!(timer.reset().is_none());
    }

    #[test]
    fn test_zero_timer_does_not_start() {
        let mut timer = FocusTimer::from_hms(0, 0, 0);
        assert!(!timer.start());
        assert!(timer.reset().is_none());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::seconds(0)), "00:00:00");
        assert_eq!(format_clock(Duration::seconds(3_725)), "01:02:05");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(30)), "30 seconds");
        assert_eq!(format_duration(Duration::seconds(1)), "1 second");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::minutes(25)), "25 minutes");
        assert_eq!(format_duration(Duration::minutes(60)), "1 hour");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::minutes(150)), "2 hours, 30 minutes");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("25"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("25m"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("1h"), Some(Duration::hours(1)));
        assert_eq!(parse_duration("1h30m"), Some(Duration::minutes(90)));
        assert_eq!(parse_duration("90s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("invalid"), None);
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("5x"), None);
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        assert_eq!(parse_duration("999999999999999"), None);
        assert_eq!(parse_duration("9999999999999999s"), None);
        assert_eq!(parse_duration("9223372036854775807h"), None);
        assert_eq!(parse_duration("4611686018427387904m4611686018427387904m"), None);
        assert_eq!(parse_duration("99999999999999999999"), None);
    }
}
