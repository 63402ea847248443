//! Profile commands.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::error::DaymarkError;
use crate::features::stats::ProfileStats;
use crate::output::{format_action, format_profile};
use crate::profile::ProfileRepository;

/// Show the profile with task and focus statistics.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn profile(ctx: &Context<'_>) -> Result<String, DaymarkError> {
    let stats = ProfileStats::collect(ctx.db)?;
    format_profile(&stats, ctx.format)
}

/// Change the profile name.
///
/// # Errors
///
/// Returns [`DaymarkError::InvalidInput`] for a blank name.
pub fn rename(ctx: &Context<'_>, name: &str) -> Result<String, DaymarkError> {
    let repo = ProfileRepository::new(ctx.db);
    repo.change_user_name(name)?;
    let user = repo.get_user_data()?;

    format_action(
        &format!("{} {}", "Profile name set to".green(), user.name.bold()),
        &json!({ "name": user.name }),
        ctx.format,
    )
}
