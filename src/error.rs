use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Cell;

/// Failures surfaced by the simulation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No free cell is left for the next food item.
    #[error("no free cell left for food placement")]
    NoSpaceAvailable,
    /// `step` was called while another step was still running.
    #[error("step called while another step is in flight")]
    ReentrantStepRejected,
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("cell ({}, {}) is outside the board", .0.x, .0.y)]
    CellOutOfBounds(Cell),
    #[error("cell ({}, {}) is occupied by the snake", .0.x, .0.y)]
    CellOccupied(Cell),
}

/// Failures while loading an [`EngineConfig`](crate::config::EngineConfig) from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] EngineError),
}
