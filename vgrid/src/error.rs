//! Error types for the fallible edges of the grid (configuration only).

use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rows_per_page must be greater than zero")]
    ZeroRowsPerPage,
    #[error("wheel_step must be greater than zero")]
    ZeroWheelStep,
    #[error("scrollbar_width must be greater than zero")]
    ZeroScrollbarWidth,
    #[error("default_column_width must be greater than zero")]
    ZeroColumnWidth,
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
