//! Task commands.

use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::{AddArgs, OutputFormat};
use crate::core::parse_date_input;
use crate::error::DaymarkError;
use crate::output::{format_action, format_expired_pretty, format_task, format_tasks, to_json};
use crate::tasks::{ExpiryWatcher, Task, TaskRepository, TaskStatus};

/// Create a task.
///
/// # Errors
///
/// Returns an error for an unparseable date, a blank name, or a storage
/// failure.
pub fn add(ctx: &Context<'_>, args: &AddArgs) -> Result<String, DaymarkError> {
    let clock = ctx.db.clock();
    let date = match args.date.as_deref() {
        Some(input) => parse_date_input(input, clock.today())
            .ok_or_else(|| DaymarkError::Parse(format!("Unrecognized date: {input}")))?,
        None => clock.today(),
    };

    let task = Task::new(&args.name, args.description.as_deref(), date, clock.now_millis())?;
    TaskRepository::new(ctx.db).create_task(&task)?;

    match ctx.format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!(
            "{} {} ({})",
            "Added".green(),
            task.name.bold(),
            format!("#{}", task.id).dimmed()
        )),
    }
}

/// Tasks due today.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn today(ctx: &Context<'_>) -> Result<String, DaymarkError> {
    let tasks = TaskRepository::new(ctx.db).get_today_tasks()?;
    format_tasks(&tasks, "Today", ctx.format)
}

/// Every task.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list(ctx: &Context<'_>) -> Result<String, DaymarkError> {
    let tasks = TaskRepository::new(ctx.db).get_all_tasks()?;
    format_tasks(&tasks, "All tasks", ctx.format)
}

/// Mark a task done or pending.
///
/// # Errors
///
/// Returns [`DaymarkError::NotFound`] for an unknown id, or a storage error.
pub fn set_status(ctx: &Context<'_>, id: i64, status: TaskStatus) -> Result<String, DaymarkError> {
    let repo = TaskRepository::new(ctx.db);
    // Sweep first so a task from yesterday shows up as expired, not pending.
    repo.expire_tasks()?;

    let task = repo
        .get_task(id)?
        .ok_or_else(|| DaymarkError::NotFound(format!("Task {id}")))?;

    if repo.update_task_status(&task, status)? {
        let updated = repo
            .get_task(id)?
            .ok_or_else(|| DaymarkError::NotFound(format!("Task {id}")))?;
        return format_task(&updated, ctx.format);
    }

    let reason = if task.is_terminal() {
        "it has expired".to_string()
    } else if task.status == status {
        format!("it is already {status}")
    } else {
        "it is not due today".to_string()
    };
    format_action(
        &format!("{} {} left unchanged: {reason}", "Task".yellow(), task.name.bold()),
        &json!({ "updated": false, "task": task }),
        ctx.format,
    )
}

/// Delete a task.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn delete(ctx: &Context<'_>, id: i64) -> Result<String, DaymarkError> {
    let removed = TaskRepository::new(ctx.db).delete_task(id)?;
    let message = if removed {
        format!("{} task {id}", "Deleted".green())
    } else {
        format!("No task {id}; nothing deleted")
    };
    format_action(&message, &json!({ "id": id, "deleted": removed }), ctx.format)
}

/// Run the expiry sweep, or the force-expire override with `all`.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn expire(ctx: &Context<'_>, all: bool) -> Result<String, DaymarkError> {
    let repo = TaskRepository::new(ctx.db);
    let count = if all {
        repo.force_expire_all_pending_tasks()?
    } else {
        repo.expire_tasks()?
    };

    format_action(
        &format!(
            "Expired {} task{}",
            count.to_string().bold(),
            if count == 1 { "" } else { "s" }
        ),
        &json!({ "expired": count, "all": all }),
        ctx.format,
    )
}

/// One watcher cycle: report what this check expired.
///
/// # Errors
///
/// Returns an error if the sweep or query fails.
pub fn check(ctx: &Context<'_>) -> Result<String, DaymarkError> {
    let mut watcher = ExpiryWatcher::new(
        TaskRepository::new(ctx.db),
        ctx.config.tasks.sweep_mode(),
    );
    let expired = watcher.check()?;
    format_expired(&expired, ctx.format)
}

/// Check repeatedly, printing each batch of newly expired tasks.
///
/// Runs until the process is interrupted.
///
/// # Errors
///
/// Returns the first storage or output error.
pub fn watch(ctx: &Context<'_>, interval: Option<u64>) -> Result<String, DaymarkError> {
    let secs = interval
        .unwrap_or(ctx.config.tasks.watch_interval_secs)
        .max(1);
    let mut watcher = ExpiryWatcher::new(
        TaskRepository::new(ctx.db),
        ctx.config.tasks.sweep_mode(),
    );

    eprintln!("{}", format!("Checking for expired tasks every {secs}s").dimmed());
    let mut stdout = std::io::stdout();

    loop {
        let expired = watcher.check()?;
        if !expired.is_empty() {
            writeln!(stdout, "{}", format_expired(&expired, ctx.format)?)?;
            stdout.flush()?;
        }
        std::thread::sleep(Duration::from_secs(secs));
    }
}

fn format_expired(tasks: &[Task], format: OutputFormat) -> Result<String, DaymarkError> {
    match format {
        OutputFormat::Pretty => Ok(format_expired_pretty(tasks)),
        OutputFormat::Json => to_json(&json!({ "count": tasks.len(), "items": tasks })),
    }
}
