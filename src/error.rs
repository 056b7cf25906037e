use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the settings file or the resolved configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid size {0} is out of range ({min}..={max})", min = crate::config::MIN_GRID_SIZE, max = crate::config::MAX_GRID_SIZE)]
    GridSize(u16),

    #[error("cell size {0} is out of range (1..={max})", max = crate::config::MAX_CELL_SIZE)]
    CellSize(u16),

    #[error("tick interval {0}ms is shorter than {min}ms", min = crate::config::MIN_TICK_INTERVAL_MS)]
    TickInterval(u64),
}

/// Top-level failures surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot install log subscriber: {0}")]
    Subscriber(String),
}
