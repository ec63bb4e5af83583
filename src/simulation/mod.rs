//! Simulation - game state and the per-tick driver loop

pub mod layout;
pub mod state;

pub use state::State;
