//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a [`VirtualGrid`](crate::grid::VirtualGrid).
///
/// Every field has a default, so a partial JSON document is valid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows materialized per window when not fitted to the viewport.
    pub rows_per_page: usize,
    /// Derive rows per page from the mounted body height.
    pub fit_to_viewport: bool,
    /// Rows moved per wheel notch, and columns per horizontal notch.
    pub wheel_step: usize,
    /// Allow click-and-drag panning of the body.
    pub pan_enabled: bool,
    /// Width of the synthetic scrollbar track.
    pub scrollbar_width: u16,
    /// Width used for columns whose descriptor has none.
    pub default_column_width: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 50,
            fit_to_viewport: true,
            wheel_step: 3,
            pan_enabled: true,
            scrollbar_width: 1,
            default_column_width: 14,
        }
    }
}

impl GridConfig {
    /// Check the values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows_per_page == 0 {
            return Err(ConfigError::ZeroRowsPerPage);
        }
        if self.wheel_step == 0 {
            return Err(ConfigError::ZeroWheelStep);
        }
        if self.scrollbar_width == 0 {
            return Err(ConfigError::ZeroScrollbarWidth);
        }
        if self.default_column_width == 0 {
            return Err(ConfigError::ZeroColumnWidth);
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    pub fn with_fit_to_viewport(mut self, fit: bool) -> Self {
        self.fit_to_viewport = fit;
        self
    }

    pub fn with_wheel_step(mut self, step: usize) -> Self {
        self.wheel_step = step;
        self
    }

    pub fn with_pan(mut self, enabled: bool) -> Self {
        self.pan_enabled = enabled;
        self
    }
}
