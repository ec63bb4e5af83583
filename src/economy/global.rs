//! Global - cross-session progression profile
//!
//! Outlives any single game. Collects the currency every game earns, owns the
//! upgrade price schedule and the map size cap, and remembers save files.

use crate::core::config::{EngineConfig, ProgressionConfig};
use crate::core::constants::MAP_SIZE_UPGRADE_STEP;
use crate::core::error::{EngineError, Result};
use crate::economy::upgrade::{PriceSchedule, UpgradeKind};
use crate::simulation::State;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest map a new game may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSizeCap {
    pub max_height: usize,
    pub max_width: usize,
}

impl MapSizeCap {
    pub fn from_config(config: &ProgressionConfig) -> Self {
        Self {
            max_height: config.initial_max_height,
            max_width: config.initial_max_width,
        }
    }

    pub fn allows(&self, height: usize, width: usize) -> bool {
        height <= self.max_height && width <= self.max_width
    }

    fn grow(&mut self, step: usize) {
        self.max_height = self.max_height.saturating_add(step);
        self.max_width = self.max_width.saturating_add(step);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Global {
    /// Accumulated currency
    pub value: i64,
    /// Index into `saves` of the game played last
    pub last_played: Option<usize>,
    pub map_size_cap: MapSizeCap,
    pub prices: PriceSchedule,
    pub saves: Vec<PathBuf>,
}

impl Default for Global {
    fn default() -> Self {
        Self::new(&ProgressionConfig::default())
    }
}

impl Global {
    pub fn new(config: &ProgressionConfig) -> Self {
        Self {
            value: 0,
            last_played: None,
            map_size_cap: MapSizeCap::from_config(config),
            prices: PriceSchedule::default(),
            saves: Vec::new(),
        }
    }

    pub fn credit(&mut self, amount: i64) {
        self.value = self.value.saturating_add(amount);
    }

    pub fn spend(&mut self, amount: i64) -> Result<()> {
        if amount > self.value {
            return Err(EngineError::InsufficientFunds {
                needed: amount,
                available: self.value,
            });
        }
        self.value -= amount;
        Ok(())
    }

    pub fn price_of(&self, kind: UpgradeKind) -> i64 {
        self.prices.price_of(kind)
    }

    /// Pay for one upgrade of `kind` and bump its price. Map size upgrades
    /// take effect here; machine levels are raised by the game.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<i64> {
        let price = self.price_of(kind);
        self.spend(price)?;
        self.prices.record_purchase(kind);
        if kind == UpgradeKind::MapSize {
            self.map_size_cap.grow(MAP_SIZE_UPGRADE_STEP);
        }
        tracing::debug!("Purchased {} upgrade for {}", kind, price);
        Ok(price)
    }

    /// Remember a save file; returns its index. Known paths are not duplicated.
    pub fn register_save(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        if let Some(index) = self.saves.iter().position(|p| p == path) {
            return index;
        }
        self.saves.push(path.to_path_buf());
        self.saves.len() - 1
    }

    /// Mark a registered save as the one last played
    pub fn select_save(&mut self, index: usize) -> Result<&Path> {
        let count = self.saves.len();
        let path = self
            .saves
            .get(index)
            .ok_or(EngineError::UnknownSave { index, count })?;
        self.last_played = Some(index);
        Ok(path)
    }

    pub fn last_played_save(&self) -> Option<&Path> {
        self.last_played
            .and_then(|i| self.saves.get(i))
            .map(PathBuf::as_path)
    }

    pub fn check_map_size(&self, height: usize, width: usize) -> Result<()> {
        if self.map_size_cap.allows(height, width) {
            Ok(())
        } else {
            Err(EngineError::MapTooLarge {
                height,
                width,
                max_height: self.map_size_cap.max_height,
                max_width: self.map_size_cap.max_width,
            })
        }
    }

    /// Start a fresh game sized by `config.map`, within the unlocked cap
    pub fn new_game(&self, config: &EngineConfig) -> Result<State> {
        self.check_map_size(config.map.height, config.map.width)?;
        State::generate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_requires_funds() {
        let mut global = Global::default();
        global.credit(120);

        assert!(matches!(
            global.purchase(UpgradeKind::Cutter),
            Err(EngineError::InsufficientFunds { needed: 150, available: 120 })
        ));
        assert_eq!(global.prices.cutter, 0);

        assert_eq!(global.purchase(UpgradeKind::Miner).unwrap(), 100);
        assert_eq!(global.value, 20);
        assert_eq!(global.price_of(UpgradeKind::Miner), 200);
        assert!(matches!(
            global.purchase(UpgradeKind::Miner),
            Err(EngineError::InsufficientFunds { needed: 200, available: 20 })
        ));
    }

    #[test]
    fn test_map_size_upgrade_grows_cap() {
        let mut global = Global::default();
        global.credit(1_000);
        assert!(global.check_map_size(20, 20).is_err());

        global.purchase(UpgradeKind::MapSize).unwrap();
        assert!(global.check_map_size(20, 20).is_ok());
        assert!(global.check_map_size(21, 20).is_err());
    }

    #[test]
    fn test_saves_are_registered_once() {
        let mut global = Global::default();
        let a = global.register_save("a.json");
        let b = global.register_save("b.json");
        assert_eq!(global.register_save("a.json"), a);
        assert_ne!(a, b);

        assert_eq!(global.select_save(b).unwrap(), Path::new("b.json"));
        assert_eq!(global.last_played, Some(b));
        assert!(matches!(
            global.select_save(7),
            Err(EngineError::UnknownSave { index: 7, count: 2 })
        ));
        assert_eq!(global.last_played_save(), Some(Path::new("b.json")));
    }

    #[test]
    fn test_new_game_respects_cap() {
        let global = Global::default();
        let mut config = EngineConfig::default();
        config.map.height = 64;
        assert!(matches!(
            global.new_game(&config),
            Err(EngineError::MapTooLarge { height: 64, .. })
        ));

        config.map.height = 8;
        config.map.width = 8;
        let state = global.new_game(&config).unwrap();
        assert_eq!(state.map().height(), 8);
    }
}
