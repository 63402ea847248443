use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use daymark::cli::args::Cli;
use daymark::cli::commands::{self, Context};
use daymark::config::{ColorSetting, Config, Paths};
use daymark::logging;
use daymark::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.home).context("could not locate the data directory")?;
    let config = Config::load_from_path(&paths.config_file)?;

    logging::init(&config.general.log_level);

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }

    let db = Database::open(&paths)
        .with_context(|| format!("could not open {}", paths.database.display()))?;
    let ctx = Context {
        db: &db,
        config: &config,
        format: cli.output.unwrap_or(config.general.default_output),
    };

    let output = commands::dispatch(&ctx, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
