//! daymark - dated tasks that expire at the end of their day, plus a focus
//! timer whose sessions add up on a single local profile.
//!
//! All state lives in one SQLite file opened lazily through
//! [`storage::Database`]. Reads and writes go through the repositories in
//! [`tasks`] and [`profile`].

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod profile;
pub mod storage;
pub mod tasks;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::DaymarkError;
pub use profile::{ProfileRepository, UserData};
pub use storage::Database;
pub use tasks::{ExpiryWatcher, Task, TaskRepository, TaskStatus};
