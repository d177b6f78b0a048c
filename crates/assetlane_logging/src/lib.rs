//! Shared logging utilities for the assetlane binary.
//!
//! Logs go to two places: a daily rolling file under `<home>/logs` and
//! stderr. The file layer honours `RUST_LOG` (default [`DEFAULT_LOG_FILTER`]);
//! the console layer stays at `warn` unless verbose output is requested so
//! that table and JSON output on stdout is never interleaved with log lines.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_FILTER: &str = "assetlane=info";

/// Environment variable overriding the assetlane home directory.
pub const HOME_ENV: &str = "ASSETLANE_HOME";

/// Logging configuration for the binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Initialize tracing with a rolling file writer and stderr output.
///
/// The returned guard flushes the file writer when dropped, so the caller
/// must hold it for the lifetime of the process. `None` means the log
/// directory was unavailable and only stderr logging is active.
pub fn init_logging(config: LogConfig<'_>) -> Option<WorkerGuard> {
    let console_filter = if config.verbose {
        env_filter()
    } else {
        EnvFilter::new("warn")
    };

    let mut guard = None;
    let mut log_dir = None;
    let file_layer = match ensure_logs_dir() {
        Ok(dir) => {
            log_dir = Some(dir.clone());
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", sanitize_name(config.app_name)));
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter()),
            )
        }
        Err(err) => {
            eprintln!("Warning: file logging disabled: {:#}", err);
            None
        }
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    if let Some(dir) = log_dir {
        tracing::debug!(log_dir = %dir.display(), "File logging enabled");
    }
    guard
}

/// `RUST_LOG` if set, otherwise [`DEFAULT_LOG_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Get the assetlane home directory: `$ASSETLANE_HOME` or `~/.assetlane`.
pub fn assetlane_home() -> PathBuf {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".assetlane")
}

/// Get the logs directory: `<home>/logs`
pub fn logs_dir() -> PathBuf {
    logs_dir_in(&assetlane_home())
}

fn logs_dir_in(home: &Path) -> PathBuf {
    home.join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
