//! Miner - extracts ore from the deposit under it

use crate::building::{BuildingInfo, BuildingType};
use crate::core::types::{BuildingId, Direction};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Miner {
    pub info: BuildingInfo,
    /// Mined ore waiting to be pushed forward
    pub ores: Buffer,
}

impl Miner {
    pub fn new(direction: Direction, id: BuildingId) -> Self {
        Self {
            info: BuildingInfo::new(BuildingType::Miner, direction, id),
            ores: Buffer::new(),
        }
    }

    /// Mine one tick's worth of ore, then offer everything held to the cell ahead.
    ///
    /// If nothing ahead accepts from us the ore simply stays here.
    pub fn update(&mut self, acc: &mut Accessor<'_>) {
        if let Some(ore) = acc.current_chunk().ore().cloned() {
            self.ores.add(ore, acc.efficiency().mining_rate());
        }

        if self.ores.is_empty() {
            return;
        }

        let here = acc.position();
        let offer = Capability::custom(self.ores.clone());
        let moved = acc.push(here, self.info.direction.offset(), &mut self.ores, &offer);
        if moved > 0 {
            tracing::trace!("Miner {} at {} pushed {} units", self.info.id, here, moved);
        }
    }
}
