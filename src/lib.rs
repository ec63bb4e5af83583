//! Oreflow - grid-based production network simulation
//!
//! Ore is mined, carried by belts, cut into refined goods and delivered to task
//! centers, whose deliveries fill quotas and earn currency for a persistent
//! profile. The simulation only advances when the host calls `State::tick`.

pub mod building;
pub mod core;
pub mod economy;
pub mod grid;
pub mod items;
pub mod persistence;
pub mod simulation;

pub use crate::core::{EngineConfig, EngineError, Result};
pub use crate::simulation::State;
