//! Economy - store, tasks, upgrades and the cross-session profile

pub mod global;
pub mod store;
pub mod task;
pub mod upgrade;

pub use global::{Global, MapSizeCap};
pub use store::Economy;
pub use task::{Requirement, Task};
pub use upgrade::{Command, Efficiency, PriceSchedule, UpgradeKind};
