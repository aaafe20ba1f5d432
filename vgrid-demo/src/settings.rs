//! Loading the grid configuration from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use vgrid::GridConfig;

use crate::error::AppError;

/// Read `path` as a JSON [`GridConfig`]. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<GridConfig, AppError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("[settings] no config at {}, using defaults", path.display());
            return Ok(GridConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config = GridConfig::from_json_str(&text).map_err(|source| AppError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("[settings] loaded {}", path.display());
    Ok(config)
}
