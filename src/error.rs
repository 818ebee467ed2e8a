//! Error types
//!
//! Configuration errors are fatal at construction time. Score and settings
//! errors come from the persistence boundary and are propagated to the host.

use thiserror::Error;

use crate::sim::VehicleKind;

/// Invalid traffic configuration, rejected before the simulation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("at least 2 lanes are required (one must stay free), got {0}")]
    TooFewLanes(usize),

    #[error("lane width must be positive and finite, got {0}")]
    InvalidLaneWidth(f32),

    #[error("lane margin must be non-negative and finite, got {0}")]
    InvalidLaneMargin(f32),

    #[error("max obstacles per lane must be at least 1")]
    ZeroLaneCapacity,

    #[error("screen height must be positive and finite, got {0}")]
    InvalidScreenHeight(f32),

    #[error("{kind:?} extent must be positive and finite, got {width}x{height}")]
    InvalidVehicleSize {
        kind: VehicleKind,
        width: f32,
        height: f32,
    },

    #[error("{kind:?} is {width} wide but a lane only fits {available} after its margin")]
    VehicleTooWide {
        kind: VehicleKind,
        width: f32,
        available: f32,
    },

    #[error("pool of {pool} obstacles exceeds usable lane capacity of {capacity}")]
    PoolTooLarge { pool: usize, capacity: usize },

    #[error("spawn spread {spread} is too small, need at least {required}")]
    SpawnSpreadTooSmall { spread: f32, required: f32 },
}

/// Failure reading or writing the score table
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `name,points`, got {content:?}")]
    FieldCount { line: usize, content: String },

    #[error("line {line}: invalid points {value:?}")]
    InvalidPoints {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("record name {0:?} cannot contain a comma or line break")]
    InvalidName(String),
}

/// Failure reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
