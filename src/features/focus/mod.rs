//! Focus mode timer and session tracking.
//!
//! - Countdown timer with start/tick/reset
//! - Recording elapsed focus time into the profile aggregates

pub mod storage;
pub mod timer;

pub use storage::FocusRecorder;
pub use timer::{
    format_clock, format_duration, parse_duration, FocusTimer, SessionOutcome, TimerState,
    DEFAULT_TICK_MILLIS,
};
