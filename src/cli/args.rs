use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "daymark")]
#[command(about = "Dated tasks that expire at the end of their day, plus a focus timer")]
#[command(long_about = "daymark - dated tasks and a focus timer

Tasks belong to a day. Anything still pending when its day has passed
expires automatically. Finished focus sessions add up on your profile.

QUICK START:
  daymark add \"Buy milk\"        Add a task for today
  daymark today                 Show today's tasks
  daymark done <id>             Mark a task done
  daymark focus start 25m       Run a 25 minute focus timer
  daymark profile               Show your statistics

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` setting in config.yaml.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory holding config.yaml and daymark.db
    #[arg(long, global = true, env = "DAYMARK_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    ///
    /// The task is due today unless --date says otherwise.
    ///
    /// # Examples
    ///
    ///   daymark add "Buy milk"
    ///   daymark add "Dentist" --date tomorrow -d "Bring insurance card"
    #[command(alias = "a")]
    Add(AddArgs),

    /// List tasks due today
    #[command(alias = "t")]
    Today,

    /// List every task, newest first
    #[command(alias = "ls")]
    List,

    /// Mark a task due today as done
    Done {
        /// Task ID
        id: i64,
    },

    /// Move a done task due today back to pending
    Undo {
        /// Task ID
        id: i64,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: i64,
    },

    /// Expire overdue pending tasks now
    Expire {
        /// Expire every pending task regardless of its date
        #[arg(long)]
        all: bool,
    },

    /// Run one expiry check and list the tasks it expired
    Check,

    /// Keep checking for expired tasks until interrupted
    Watch {
        /// Seconds between checks (defaults to `tasks.watch_interval_secs`)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show profile statistics
    Profile,

    /// Change the profile name
    Rename {
        /// New display name
        name: String,
    },

    /// Focus timer
    Focus(FocusArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,

    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date: today, tomorrow, "in 3 days", or YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct FocusArgs {
    #[command(subcommand)]
    pub command: FocusCommands,
}

#[derive(Subcommand)]
pub enum FocusCommands {
    /// Run a countdown in the terminal and record it when it ends
    ///
    /// # Examples
    ///
    ///   daymark focus start          Default length from config
    ///   daymark focus start 45m
    ///   daymark focus start 1h30m
    Start {
        /// Length like 25m, 1h30m, 90s (bare numbers are minutes)
        duration: Option<String>,
    },

    /// Record a session that was timed elsewhere
    Log {
        /// Length like 25m, 1h30m, 90s (bare numbers are minutes)
        duration: String,
    },
}
