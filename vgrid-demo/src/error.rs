//! Demo error type.

use std::path::PathBuf;

use thiserror::Error;
use vgrid::ConfigError;

/// Errors that end the demo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("invalid row count {0:?}")]
    RowCount(String),
}
