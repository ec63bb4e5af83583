use crate::building::BuildingType;
use crate::core::types::Position;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Position ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        height: usize,
        width: usize,
    },

    #[error("Cell {0} already holds a building")]
    OccupiedCell(Position),

    #[error("No building is anchored at {0}")]
    EmptyCellRemoval(Position),

    #[error("A {0} cannot be placed directly")]
    NotPlaceable(BuildingType),

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("Map size {height}x{width} exceeds the unlocked cap {max_height}x{max_width}")]
    MapTooLarge {
        height: usize,
        width: usize,
        max_height: usize,
        max_width: usize,
    },

    #[error("No save registered at index {index} ({count} known)")]
    UnknownSave { index: usize, count: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
