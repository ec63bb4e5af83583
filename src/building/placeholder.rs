//! PlaceHolder - stand-in for the non-anchor cells of a multi-cell building
//!
//! A placeholder only knows where its anchor is and which way the building
//! faces. Every operation is redirected to the anchor through a relocated
//! accessor; placeholders never update on their own.

use crate::building::{BuildingInfo, BuildingType};
use crate::core::types::{BuildingId, Direction, Offset, Position};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceHolder {
    /// Facing of the building this cell belongs to
    pub direction: Direction,
    /// Displacement from this cell to the anchor cell
    pub anchor: Offset,
}

impl PlaceHolder {
    pub fn new(direction: Direction, anchor: Offset) -> Self {
        Self { direction, anchor }
    }

    /// Placeholder for cell `here` of a building anchored at `anchor`
    pub fn linking(here: Position, anchor: Position, direction: Direction) -> Self {
        Self::new(direction, here.offset_to(anchor))
    }

    /// Absolute anchor position, seen from the cell at `here`
    pub fn anchor_from(&self, here: Position) -> Option<Position> {
        here.checked_add(self.anchor)
    }

    pub fn info(&self) -> BuildingInfo {
        BuildingInfo::new(BuildingType::PlaceHolder, self.direction, BuildingId::default())
    }

    /// Input positions of the anchor building
    pub fn input_positions(&self, acc: &mut Accessor<'_>) -> Vec<Position> {
        let Some(anchor) = self.anchor_from(acc.position()) else {
            return Vec::new();
        };
        match acc.at(anchor) {
            Ok(anchor_acc) => anchor_acc.anchored_input_positions(),
            Err(_) => Vec::new(),
        }
    }

    /// Forward an input to the anchor building
    pub fn input(&self, acc: &mut Accessor<'_>, source: &mut Buffer, offer: &Capability) -> u64 {
        let Some(anchor) = self.anchor_from(acc.position()) else {
            return 0;
        };
        match acc.at(anchor) {
            Ok(mut anchor_acc) => anchor_acc.anchored_input(source, offer),
            Err(_) => 0,
        }
    }
}
