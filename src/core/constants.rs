//! Simulation constants - fixed mechanic values in one place
//!
//! Anything a player or host should be able to tune lives in `EngineConfig`
//! instead; these are the rules of the machines themselves.

// Belt timing: progress advances by a fixed step each tick, a push happens at full
pub const BELT_PROGRESS_STEP: u32 = 10;
pub const BELT_PROGRESS_FULL: u32 = 100;

// Units a belt moves per item per push, multiplied by the belt level
pub const BELT_CEILING_PER_LEVEL: u64 = 4;

// Starting level of every efficiency track
pub const BASE_EFFICIENCY: u32 = 1;

// Upgrade prices double with every purchase of the same kind
pub const MINER_UPGRADE_BASE_PRICE: i64 = 100;
pub const BELT_UPGRADE_BASE_PRICE: i64 = 80;
pub const CUTTER_UPGRADE_BASE_PRICE: i64 = 150;
pub const MAP_SIZE_UPGRADE_BASE_PRICE: i64 = 200;

// Rows and columns added to the map cap by one map size upgrade
pub const MAP_SIZE_UPGRADE_STEP: usize = 4;

// Cap on the doubling exponent so prices never overflow
pub const MAX_PRICE_DOUBLINGS: u32 = 40;
