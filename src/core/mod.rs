//! Core abstractions for daymark.
//!
//! Calendar helpers and the clock seam shared by storage, lifecycle, and
//! focus code.

mod datetime;
mod traits;

pub use datetime::{format_date, parse_date_input, parse_stored_date, today, today_in, DATE_FORMAT};
pub use traits::{Clock, ManualClock, SystemClock};

#[cfg(test)]
pub use traits::MockClock;
