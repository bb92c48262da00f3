//! Logging initialization.
//!
//! Log lines go to stderr so command output on stdout stays clean. When a log
//! directory is configured, JSON lines are also written to daily-rotated files.

use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{CliConfig, LogFormat};

/// Keeps the non-blocking file writer alive for the lifetime of the program.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system.
///
/// The filter is taken from `RUST_LOG`, then `PHONEBOOK_LOG_LEVEL`, then the
/// configured `log_level`.
///
/// # Errors
///
/// Returns an error if the filter cannot be parsed, the log directory cannot
/// be created, or a global subscriber is already installed.
pub fn init(config: &CliConfig) -> anyhow::Result<()> {
    let log_level =
        std::env::var("PHONEBOOK_LOG_LEVEL").unwrap_or_else(|_| config.log_level.clone());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let mut layers: Vec<BoxedLayer> = vec![stderr_layer(config.log_format)];
    if let Some(dir) = &config.log_dir {
        layers.push(file_layer(dir)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn file_layer(dir: &Path) -> anyhow::Result<BoxedLayer> {
    std::fs::create_dir_all(dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "phonebook");
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(file_guard);

    Ok(fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed())
}
