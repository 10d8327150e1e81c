//! Debug logging support for rsed
//!
//! When debug mode is enabled via config or `RSED_DEBUG`, operations are
//! logged to ~/.rsed/rsed.log. `RSED_LOG` overrides the default
//! `rsed=debug` filter, e.g. `RSED_LOG=rsed::engine=trace`.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Environment variable that turns on debug logging for one run
pub const DEBUG_ENV: &str = "RSED_DEBUG";

/// Environment variable holding a custom log filter
pub const FILTER_ENV: &str = "RSED_LOG";

const DEFAULT_FILTER: &str = "rsed=debug";

/// Whether debug logging is requested by config or environment
pub fn debug_requested(config_debug: bool) -> bool {
    config_debug || std::env::var_os(DEBUG_ENV).is_some()
}

/// Install the file subscriber when debug logging is enabled
///
/// Returns the log path in use. A log file that cannot be opened only
/// produces a warning; the run continues without logging.
pub fn init_debug_logging(debug_enabled: bool) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    let log_path = get_log_path()?;
    let log_file = match open_log_file(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: {:#}; debug logging disabled", e);
            return Ok(None);
        }
    };

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    registry()
        .with(
            fmt::layer()
                .compact()
                .with_writer(log_file)
                .with_ansi(false)
                .with_timer(fmt::time::uptime())
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .context("Failed to set tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), pid = std::process::id(), "rsed started");
    Ok(Some(log_path))
}

/// Open `path` for appending, creating it and its directory as needed
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Get the log file path (~/.rsed/rsed.log)
pub fn get_log_path() -> Result<PathBuf> {
    Ok(crate::config::rsed_dir()?.join("rsed.log"))
}
