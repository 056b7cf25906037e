use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const DEFAULT_FILTER: &str = "info";

/// Result of setting up logging for one run.
#[derive(Debug)]
pub enum LogSetup {
    Enabled(PathBuf),
    /// No log location is known for this platform.
    Disabled,
    /// The default log file could not be used; the game runs without logging.
    Unavailable { path: PathBuf, error: AppError },
}

/// Installs a subscriber for `explicit` when given, otherwise for `default`.
///
/// Only a failure on an explicitly requested file is an error. A failure on the
/// default location disables logging and is reported as [`LogSetup::Unavailable`].
pub fn setup(explicit: Option<&Path>, default: Option<PathBuf>) -> Result<LogSetup, AppError> {
    if let Some(path) = explicit {
        init(path)?;
        return Ok(LogSetup::Enabled(path.to_path_buf()));
    }

    let Some(path) = default else {
        return Ok(LogSetup::Disabled);
    };

    match init(&path) {
        Ok(()) => Ok(LogSetup::Enabled(path)),
        Err(error) => Ok(LogSetup::Unavailable { path, error }),
    }
}

/// Installs a `tracing` subscriber that appends to `path`.
///
/// The terminal belongs to the game, so log lines never go to stdout or stderr.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(path: &Path) -> Result<(), AppError> {
    let file = open_log_file(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| AppError::Subscriber(error.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, AppError> {
    let log_file_error = |source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(log_file_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_file_error)
}
