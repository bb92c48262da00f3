//! # phonebook
//!
//! Command-line front end for the phonebook records.
//!
//! ```bash
//! phonebook check-model M-SAM-123
//! phonebook check-name "Jane Doe" --full
//! phonebook roster people.toml --json
//! ```
//!
//! Exits with status 1 when the input is rejected.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::process::ExitCode;

use tracing::debug;

mod cli;
mod commands;
mod config;
mod logging;

use cli::{CommandLine, Commands};
use config::CliConfig;

fn main() -> anyhow::Result<ExitCode> {
    let args = CommandLine::parse_args();

    let mut config = CliConfig::load(args.config.as_deref())?;
    if let Some(format) = args.log_format {
        config.log_format = format;
    }
    logging::init(&config)?;

    debug!(command = ?args.command, "Starting phonebook");

    let mut stdout = std::io::stdout().lock();
    let accepted = match &args.command {
        Commands::CheckModel { model } => commands::check_model(model, &mut stdout)?,
        Commands::CheckName { name, full } => commands::check_name(name, *full, &mut stdout)?,
        Commands::Roster { file, json } => commands::roster(file, *json, &mut stdout)?,
    };

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
