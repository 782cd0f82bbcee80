//! Log output setup

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::{LogLevel, Logging};

/// Filter directive for a configured level
pub fn level_directive(level: &LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "debug",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
        LogLevel::Info | LogLevel::Unknown(_) => "info",
    }
}

/// Installs the global tracing subscriber
///
/// `RUST_LOG`, when set, takes precedence over `logging.level`. Output goes
/// to `logging.file` (appended, created if needed) or to stdout.
pub fn init(logging: &Logging) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&logging.level)));

    let installed = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stdout)
            .try_init(),
    };

    installed
        .map_err(|e| anyhow!(e))
        .context("Failed to install logger")
}
