// src/logging.rs
//! Logging macros and subscriber setup shared by the library and the CLI

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// `app_log!(info, "...")` forwards to the matching `tracing` macro.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

/// `app_span!("name", key = value)` opens an info-level span.
#[macro_export]
macro_rules! app_span {
    ($name:expr $(, $($fields:tt)+)?) => {
        ::tracing::info_span!($name $(, $($fields)+)?)
    };
}

/// Install the JSON file subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(log_file: &Path, default_level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log directive")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
