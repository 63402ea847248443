//! Output formatting for daymark.
//!
//! This module provides formatters for displaying tasks and profile data in
//! various formats.

mod json;
mod pretty;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::DaymarkError;
use crate::features::stats::ProfileStats;
use crate::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `DaymarkError::Parse` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, DaymarkError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `DaymarkError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, DaymarkError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format profile statistics based on output format
///
/// # Errors
///
/// Returns `DaymarkError::Parse` if JSON serialization fails.
pub fn format_profile(stats: &ProfileStats, format: OutputFormat) -> Result<String, DaymarkError> {
    match format {
        OutputFormat::Pretty => Ok(format_profile_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format the result of an action: a sentence for people, `data` for scripts.
///
/// # Errors
///
/// Returns `DaymarkError::Parse` if JSON serialization fails.
pub fn format_action<T: Serialize>(
    message: &str,
    data: &T,
    format: OutputFormat,
) -> Result<String, DaymarkError> {
    match format {
        OutputFormat::Pretty => Ok(message.to_string()),
        OutputFormat::Json => to_json(data),
    }
}
