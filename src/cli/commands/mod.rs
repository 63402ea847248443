//! Command implementations for daymark.
//!
//! Each command talks to storage only through the repositories and returns
//! the text to print.

mod focus;
mod profile;
mod tasks;

pub use focus::focus;
pub use profile::{profile, rename};
pub use tasks::{add, check, delete, expire, list, set_status, today, watch};

use crate::cli::args::{Commands, OutputFormat};
use crate::config::Config;
use crate::error::DaymarkError;
use crate::storage::Database;
use crate::tasks::TaskStatus;

/// Everything a command needs.
pub struct Context<'a> {
    pub db: &'a Database,
    pub config: &'a Config,
    pub format: OutputFormat,
}

/// Route a parsed command to its implementation.
///
/// # Errors
///
/// Returns whatever error the command produced.
pub fn dispatch(ctx: &Context<'_>, command: Commands) -> Result<String, DaymarkError> {
    match command {
        Commands::Add(args) => add(ctx, &args),
        Commands::Today => today(ctx),
        Commands::List => list(ctx),
        Commands::Done { id } => set_status(ctx, id, TaskStatus::Done),
        Commands::Undo { id } => set_status(ctx, id, TaskStatus::Pending),
        Commands::Delete { id } => delete(ctx, id),
        Commands::Expire { all } => expire(ctx, all),
        Commands::Check => check(ctx),
        Commands::Watch { interval } => watch(ctx, interval),
        Commands::Profile => profile(ctx),
        Commands::Rename { name } => rename(ctx, &name),
        Commands::Focus(args) => focus(ctx, args.command),
    }
}
