//! CLI configuration.
//!
//! Settings are read from a TOML file:
//! - the path given with `--config`, which must exist
//! - otherwise `config.toml` in the platform config directory
//!   (e.g. `~/.config/phonebook/config.toml`), if present
//!
//! Missing keys fall back to their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Output format for log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default log filter, e.g. `info` or `phonebook_core=debug`.
    pub log_level: String,

    /// Format of stderr log output.
    pub log_format: LogFormat,

    /// Directory for daily-rotated JSON log files. File logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path cannot be read, or if a config
    /// file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Returns the platform-specific default config file path.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "phonebook")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
