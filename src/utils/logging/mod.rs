//! Logging setup
//!
//! Console output goes through `tracing-subscriber`'s fmt layer in either the
//! human readable or JSON format. Errors can additionally be appended to a
//! file so failed batches leave a trace after the terminal is gone.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{LabError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the filter, letting `RUST_LOG` take precedence over the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| LabError::config(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let console = match config.format {
        LogFormat::Json => fmt::layer().json().with_target(false).boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    let error_file = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::ERROR),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(error_file)
        .try_init()
        .map_err(|e| LabError::internal(format!("Failed to initialize logging: {}", e)))
}
