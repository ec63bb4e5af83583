use crate::building::{BuildingInfo, BuildingType};
use crate::core::types::{BuildingId, Direction, Position};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability};
use serde::{Deserialize, Serialize};

/// Destroys whatever any neighbour pushes into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashCan {
    pub info: BuildingInfo,
}

impl TrashCan {
    pub fn new(direction: Direction, id: BuildingId) -> Self {
        Self {
            info: BuildingInfo::new(BuildingType::TrashCan, direction, id),
        }
    }

    pub fn input_positions(&self, acc: &Accessor<'_>) -> Vec<Position> {
        Direction::ALL
            .iter()
            .filter_map(|d| acc.relative_pos_by(d.offset()).ok())
            .collect()
    }

    pub fn input(&mut self, source: &mut Buffer, offer: &Capability) -> u64 {
        source.discard(&offer.merge(&Capability::any()))
    }
}
