//! Focus timer commands.

use std::io::Write;
use std::time::Duration as StdDuration;

use chrono::Duration;
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use super::Context;
use crate::cli::args::FocusCommands;
use crate::error::DaymarkError;
use crate::features::focus::{
    format_duration, parse_duration, FocusRecorder, FocusTimer, DEFAULT_TICK_MILLIS,
};
use crate::output::format_action;

/// Run a focus subcommand.
///
/// # Errors
///
/// Returns an error for an unparseable duration or a storage failure.
pub fn focus(ctx: &Context<'_>, command: FocusCommands) -> Result<String, DaymarkError> {
    match command {
        FocusCommands::Start { duration } => start(ctx, duration.as_deref()),
        FocusCommands::Log { duration } => log(ctx, &duration),
    }
}

fn parse_length(input: &str) -> Result<Duration, DaymarkError> {
    parse_duration(input).ok_or_else(|| {
        DaymarkError::Parse(format!("Invalid duration: {input} (try 25m, 1h30m or 90s)"))
    })
}

fn start(ctx: &Context<'_>, duration: Option<&str>) -> Result<String, DaymarkError> {
    let length = match duration {
        Some(input) => parse_length(input)?,
        None => Duration::minutes(i64::from(ctx.config.focus.default_minutes)),
    };
    let tick = i64::try_from(ctx.config.focus.tick_millis)
        .ok()
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_TICK_MILLIS);

    let mut timer = FocusTimer::new(length);
    if !timer.start() {
        return Err(DaymarkError::InvalidInput(
            "Focus length must be greater than zero".to_string(),
        ));
    }
    debug!(planned_ms = timer.planned_ms(), tick, "focus timer started");

    let mut stderr = std::io::stderr();
    loop {
        write!(stderr, "\r{} {}", "Focus".cyan().bold(), timer.format_remaining())?;
        stderr.flush()?;
        if !timer.is_running() {
            break;
        }
        std::thread::sleep(StdDuration::from_millis(tick.unsigned_abs()));
        timer.tick(tick);
    }
    writeln!(stderr)?;

    let outcome = timer.reset();
    FocusRecorder::new(ctx.db).record(outcome.as_ref())?;

    format_action(
        &format!(
            "{} Focused for {}",
            "Done!".green().bold(),
            format_duration(Duration::milliseconds(timer.planned_ms()))
        ),
        &outcome,
        ctx.format,
    )
}

fn log(ctx: &Context<'_>, duration: &str) -> Result<String, DaymarkError> {
    let length = parse_length(duration)?;
    let elapsed_ms = length.num_milliseconds();
    FocusRecorder::new(ctx.db).record_elapsed(elapsed_ms)?;

    format_action(
        &format!("{} {} of focus", "Logged".green(), format_duration(length)),
        &json!({ "elapsedMs": elapsed_ms }),
        ctx.format,
    )
}
