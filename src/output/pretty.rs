use chrono::{DateTime, Local, Utc};
use colored::Colorize;

use crate::features::focus::format_duration;
use crate::features::stats::{render_progress_bar, ProfileStats};
use crate::tasks::{Task, TaskStatus};

fn status_icon(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::Pending => "[ ]".white(),
        TaskStatus::Done => "[x]".green(),
        TaskStatus::Expired => "[-]".red(),
    }
}

fn display_name(task: &Task) -> String {
    match task.status {
        TaskStatus::Expired => task.name.strikethrough().dimmed().to_string(),
        _ => task.name.bold().to_string(),
    }
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No tasks");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let mut line = format!("{} {}", status_icon(task.status), display_name(task));
        line.push_str(&format!("  {}", task.date.yellow()));
        line.push_str(&format!("  {}", format!("#{}", task.id).dimmed()));

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", status_icon(task.status), display_name(task));
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), task.status));
    output.push_str(&format!("  {}: {}\n", "Date".dimmed(), task.date));

    if let Some(description) = &task.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        format_timestamp(task.created_at)
    ));

    if let Some(completed_at) = task.completed_at {
        let label = if task.status == TaskStatus::Expired {
            "Expired"
        } else {
            "Completed"
        };
        output.push_str(&format!(
            "  {}: {}\n",
            label.dimmed(),
            format_timestamp(completed_at)
        ));
    }

    output
}

/// Format the profile view
pub fn format_profile_pretty(stats: &ProfileStats) -> String {
    let mut output = String::new();

    let name = if stats.user.has_default_name() {
        stats.user.name.dimmed().to_string()
    } else {
        stats.user.name.bold().to_string()
    };
    output.push_str(&format!("Profile: {name}\n"));
    output.push_str(&"─".repeat(40));
    output.push('\n');

    output.push_str(&format!("{}\n", "Tasks".bold()));
    output.push_str(&format!("  Created:   {}\n", stats.tasks.created));
    output.push_str(&format!("  Done:      {}\n", stats.tasks.done.to_string().green()));
    output.push_str(&format!("  Pending:   {}\n", stats.tasks.pending));
    output.push_str(&format!("  Expired:   {}\n", stats.tasks.expired.to_string().red()));
    output.push_str(&format!(
        "  Completed: {} {:.0}%\n",
        render_progress_bar(stats.tasks.completion_percent, 20).cyan(),
        stats.tasks.completion_percent
    ));

    output.push('\n');
    output.push_str(&format!("{}\n", "Focus".bold()));
    let sessions = stats.focus.sessions;
    output.push_str(&format!(
        "  Sessions:  {} timer{}\n",
        sessions,
        if sessions == 1 { "" } else { "s" }
    ));
    output.push_str(&format!(
        "  Total:     {}\n",
        format_duration(stats.focus.total())
    ));
    if sessions > 0 {
        output.push_str(&format!(
            "  Average:   {}\n",
            format_duration(stats.focus.average())
        ));
    }

    output
}

/// Format the tasks an expiry check just found
pub fn format_expired_pretty(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No newly expired tasks".dimmed().to_string();
    }

    let mut output = format!(
        "{} task{} expired\n",
        tasks.len().to_string().red().bold(),
        if tasks.len() == 1 { "" } else { "s" }
    );
    for task in tasks {
        output.push_str(&format!(
            "  {} {}  {}\n",
            status_icon(task.status),
            task.name,
            task.date.yellow()
        ));
    }
    output
}
