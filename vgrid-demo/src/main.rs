mod app;
mod dataset;
mod error;
mod paths;
mod render;
mod settings;
mod terminal;

use std::fs::{self, File};
use std::path::PathBuf;

use simplelog::{Config, LevelFilter, WriteLogger};
use vgrid::{GridConfig, VirtualGrid};

use crate::app::App;
use crate::error::AppError;

const DEFAULT_ROWS: usize = 50_000;

fn init_logger() -> Result<(), AppError> {
    paths::rotate_logs();
    let path = match paths::log_file() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            path
        }
        None => PathBuf::from("vgrid-demo.log"),
    };
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)?;
    Ok(())
}

fn row_count() -> Result<usize, AppError> {
    match std::env::args().nth(1) {
        Some(arg) => arg.parse().map_err(|_| AppError::RowCount(arg)),
        None => Ok(DEFAULT_ROWS),
    }
}

fn run() -> Result<(), AppError> {
    init_logger()?;

    let config = match paths::config_file() {
        Some(path) => settings::load_config(&path)?,
        None => GridConfig::default(),
    };
    let count = row_count()?;
    log::info!("[main] generating {count} rows, {config:?}");

    let rows = dataset::generate(count, &mut rand::rng());
    let grid = VirtualGrid::new(rows, Some(dataset::descriptors()), config);
    App::new(grid).run()
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
