//! Belt - moves items one cell forward in batches
//!
//! A loaded belt advances its progress counter by a fixed step every tick.
//! When the counter fills up it resets and hands a batch to the cell ahead.
//! Upgrades never make the counter faster; they raise how many units of each
//! item fit in one batch.

use crate::building::{BuildingInfo, BuildingType};
use crate::core::constants::{BELT_PROGRESS_FULL, BELT_PROGRESS_STEP};
use crate::core::types::{BuildingId, Direction, Position};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Belt {
    pub info: BuildingInfo,
    /// 0..BELT_PROGRESS_FULL
    pub progress: u32,
    pub buffer: Buffer,
}

impl Belt {
    pub fn new(direction: Direction, id: BuildingId) -> Self {
        Self {
            info: BuildingInfo::new(BuildingType::Belt, direction, id),
            progress: 0,
            buffer: Buffer::new(),
        }
    }

    /// What one batch may carry: anything while empty, otherwise only the
    /// item kinds already on the belt, each capped at `ceiling` and at the
    /// amount held.
    pub fn transport_capability(&self, ceiling: u64) -> Capability {
        if self.buffer.is_empty() {
            Capability::any()
        } else {
            Capability::custom(self.buffer.capped(ceiling))
        }
    }

    /// Belts only load from the cell directly behind them
    pub fn input_positions(&self, acc: &Accessor<'_>) -> Vec<Position> {
        acc.relative_pos_by(self.info.direction.opposite().offset())
            .ok()
            .into_iter()
            .collect()
    }

    pub fn input(&mut self, acc: &Accessor<'_>, source: &mut Buffer, offer: &Capability) -> u64 {
        let capability = offer.merge(&self.transport_capability(acc.efficiency().belt_ceiling()));
        source.transfer_into(&mut self.buffer, &capability)
    }

    pub fn update(&mut self, acc: &mut Accessor<'_>) {
        if self.buffer.is_empty() {
            return;
        }

        self.progress = self.progress.saturating_add(BELT_PROGRESS_STEP);
        if self.progress < BELT_PROGRESS_FULL {
            return;
        }
        self.progress = 0;

        let here = acc.position();
        let offer = self.transport_capability(acc.efficiency().belt_ceiling());
        let moved = acc.push(here, self.info.direction.offset(), &mut self.buffer, &offer);
        tracing::trace!("Belt {} at {} moved {} units", self.info.id, here, moved);
    }
}
