use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "phonebook")]
#[command(about = "Validate phone model codes, person names and roster files.")]
#[command(version)]
pub struct CommandLine {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a phone model code (M-XXX-NNN)
    #[command(alias = "m")]
    CheckModel { model: String },
    /// Check a person name
    #[command(alias = "n")]
    CheckName {
        name: String,
        /// Also require at least two words
        #[arg(long)]
        full: bool,
    },
    /// Load and validate a roster file
    #[command(alias = "r")]
    Roster {
        file: PathBuf,
        /// Print the roster as JSON
        #[arg(long)]
        json: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_name() {
        let cli = CommandLine::try_parse_from(["phonebook", "check-name", "Jane Doe", "--full"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::CheckName { ref name, full: true } if name == "Jane Doe"
        ));
    }

    #[test]
    fn test_parse_global_options() {
        let cli = CommandLine::try_parse_from([
            "phonebook",
            "roster",
            "people.toml",
            "--json",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Commands::Roster { json: true, .. }));
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        CommandLine::command().debug_assert();
    }
}
