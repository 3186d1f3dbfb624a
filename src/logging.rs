//! Logging setup for the `bookstats` binary.
//!
//! Diagnostics go to stderr so stdout stays reserved for reports (and for
//! `--json` output). A daily-rotated file log can be added through the
//! `log_to_file` setting.
//!
//! ## Usage
//!
//! ```no_run
//! use bookstats::logging;
//!
//! // Initialize once at startup
//! let _guard = logging::init(false, false)?;
//!
//! tracing::warn!("Something looks off");
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/bookstats/logs`
/// - macOS: `~/Library/Application Support/bookstats/logs`
/// - Linux: `~/.local/share/bookstats/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("bookstats").join("logs"))
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program; it is `None` when file logging is off.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created, or
/// if `RUST_LOG` holds an invalid filter.
pub fn init(verbose: bool, log_to_file: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let (file_layer, guard) = if log_to_file {
        let log_dir = get_log_dir()?;
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("bookstats")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create file appender")?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(EnvFilter::new("info"));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!(verbose, log_to_file, "Logging initialized");
    Ok(guard)
}
