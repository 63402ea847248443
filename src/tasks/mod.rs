//! Dated tasks and their lifecycle.
//!
//! - [`Task`] / [`TaskStatus`]: the model and its allowed transitions
//! - [`TaskRepository`]: row-level access to the `Task` table
//! - [`ExpiryWatcher`]: the expiry sweep plus once-only reporting

pub mod lifecycle;
mod repository;
mod types;

pub use lifecycle::{ExpiryWatcher, SweepMode};
pub use repository::TaskRepository;
pub use types::{Task, TaskStatus};
