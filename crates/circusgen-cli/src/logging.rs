use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber: JSON lines appended to `log_file` when
/// given, human-readable stderr output otherwise. `RUST_LOG` sets the level.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            // Each event locks the file for one complete JSON line.
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(Mutex::new(file));

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    result.map_err(|err| LoggingError::Init(err.to_string()))
}
