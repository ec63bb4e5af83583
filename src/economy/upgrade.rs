//! Upgrades - efficiency levels, upgrade commands and their price schedule
//!
//! Efficiency levels belong to a single game; the price schedule and map cap
//! belong to the cross-session profile. Both only change through
//! `Command::ApplyUpgrade`.

use crate::core::constants::{
    BASE_EFFICIENCY, BELT_CEILING_PER_LEVEL, BELT_UPGRADE_BASE_PRICE, CUTTER_UPGRADE_BASE_PRICE,
    MAP_SIZE_UPGRADE_BASE_PRICE, MAX_PRICE_DOUBLINGS, MINER_UPGRADE_BASE_PRICE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-game machine levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Efficiency {
    pub miner: u32,
    pub belt: u32,
    pub cutter: u32,
}

impl Default for Efficiency {
    fn default() -> Self {
        Self {
            miner: BASE_EFFICIENCY,
            belt: BASE_EFFICIENCY,
            cutter: BASE_EFFICIENCY,
        }
    }
}

impl Efficiency {
    /// Units a miner extracts per tick
    pub fn mining_rate(&self) -> u64 {
        u64::from(self.miner)
    }

    /// Units of each item a belt moves per push
    pub fn belt_ceiling(&self) -> u64 {
        BELT_CEILING_PER_LEVEL * u64::from(self.belt)
    }

    /// Ore units a cutter processes per step
    pub fn cutter_batch(&self) -> u64 {
        u64::from(self.cutter)
    }

    /// Raise the level matching `kind`. Returns false for kinds that are not
    /// machine levels.
    pub fn raise(&mut self, kind: UpgradeKind) -> bool {
        let level = match kind {
            UpgradeKind::Miner => &mut self.miner,
            UpgradeKind::Belt => &mut self.belt,
            UpgradeKind::Cutter => &mut self.cutter,
            UpgradeKind::MapSize => return false,
        };
        *level = level.saturating_add(1);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    Miner,
    Belt,
    Cutter,
    MapSize,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Miner,
        UpgradeKind::Belt,
        UpgradeKind::Cutter,
        UpgradeKind::MapSize,
    ];

    pub fn base_price(self) -> i64 {
        match self {
            UpgradeKind::Miner => MINER_UPGRADE_BASE_PRICE,
            UpgradeKind::Belt => BELT_UPGRADE_BASE_PRICE,
            UpgradeKind::Cutter => CUTTER_UPGRADE_BASE_PRICE,
            UpgradeKind::MapSize => MAP_SIZE_UPGRADE_BASE_PRICE,
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpgradeKind::Miner => "miner",
            UpgradeKind::Belt => "belt",
            UpgradeKind::Cutter => "cutter",
            UpgradeKind::MapSize => "map size",
        };
        f.write_str(name)
    }
}

/// Mutations a host may request outside of placement and ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    ApplyUpgrade { kind: UpgradeKind },
}

/// Purchase counters per upgrade kind; price doubles with every purchase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSchedule {
    pub miner: u32,
    pub belt: u32,
    pub cutter: u32,
    pub map_size: u32,
}

impl PriceSchedule {
    pub fn purchases(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Miner => self.miner,
            UpgradeKind::Belt => self.belt,
            UpgradeKind::Cutter => self.cutter,
            UpgradeKind::MapSize => self.map_size,
        }
    }

    /// Current price of the next upgrade of `kind`
    pub fn price_of(&self, kind: UpgradeKind) -> i64 {
        let doublings = self.purchases(kind).min(MAX_PRICE_DOUBLINGS);
        kind.base_price().saturating_mul(1i64 << doublings)
    }

    pub fn record_purchase(&mut self, kind: UpgradeKind) {
        let counter = match kind {
            UpgradeKind::Miner => &mut self.miner,
            UpgradeKind::Belt => &mut self.belt,
            UpgradeKind::Cutter => &mut self.cutter,
            UpgradeKind::MapSize => &mut self.map_size,
        };
        *counter = counter.saturating_add(1);
    }
}
