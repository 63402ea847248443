//! Profile statistics.
//!
//! Derived numbers shown on the profile: task counts, completion rate, and
//! focus-time totals.

pub mod metrics;

pub use metrics::{render_progress_bar, FocusMetrics, ProfileStats, TaskMetrics};
