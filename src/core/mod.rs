pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use types::{BuildingId, Direction, Offset, Position, Tick};
