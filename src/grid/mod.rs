//! Grid layer - chunks, the map, and accessors for navigating it

pub mod accessor;
pub mod chunk;
pub mod map;

pub use accessor::Accessor;
pub use chunk::{Chunk, Occupant};
pub use map::Map;
