//! Tracing subscriber setup for the binary

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use super::config::LogLevel;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `log_file` the log is
/// appended to that file without colour codes; otherwise it goes to stderr.
pub fn init_tracing(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let registry = tracing_subscriber::registry().with(filter);
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
        }
        None => registry.with(fmt::layer().with_writer(io::stderr)).try_init(),
    }
    .context("failed to install tracing subscriber")
}
