//! Items layer - item catalog, quantity buffers and transfer capabilities

pub mod buffer;
pub mod capability;
pub mod item;

pub use buffer::Buffer;
pub use capability::Capability;
pub use item::{Item, GOLD, IRON, IRON_ORE, ORES, STONE};
