//! Logging setup for the reqscope binary.
//!
//! Diagnostics go to stderr so the statistics tables printed on stdout stay
//! clean. With `log_to_file`, a daily rolling log is also written to the
//! platform data directory.
//!
//! ```no_run
//! reqscope::logging::init(false).expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/reqscope/logs`
/// - macOS: `~/Library/Application Support/reqscope/logs`
/// - Linux: `~/.local/share/reqscope/logs`
///
/// # Errors
///
/// Returns error if the data directory is unknown or cannot be created
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("reqscope").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Installs the global subscriber. Level defaults to INFO and can be
/// overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created,
/// or if a global subscriber is already installed
pub fn init(log_to_file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let (file_layer, log_dir) = if log_to_file {
        let log_dir = get_log_dir()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("reqscope")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create log file appender")?;

        let layer = fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false)
            .with_writer(appender);
        (Some(layer), Some(log_dir))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::info!("Logging initialized, log directory: {}", dir.display());
    }

    Ok(())
}
