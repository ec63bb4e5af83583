//! Task center - delivery point feeding the economic store
//!
//! Everything that reaches the task center is moved into the shared store on
//! its next update and credited at item value times quantity.

use crate::building::{BuildingInfo, BuildingType};
use crate::core::types::{BuildingId, Direction, Offset, Position};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability};
use serde::{Deserialize, Serialize};

/// Cells around the 2x2 footprint that may deliver into the task center,
/// relative to the anchor (top-left) cell
pub const TASK_CENTER_INPUT_OFFSETS: [Offset; 8] = [
    Offset::new(-1, 0),
    Offset::new(-1, 1),
    Offset::new(0, -1),
    Offset::new(1, -1),
    Offset::new(0, 2),
    Offset::new(1, 2),
    Offset::new(2, 0),
    Offset::new(2, 1),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCenter {
    pub info: BuildingInfo,
    pub buffer: Buffer,
}

impl TaskCenter {
    /// Task centers have no meaningful facing and always sit upright
    pub fn new(id: BuildingId) -> Self {
        Self {
            info: BuildingInfo::new(BuildingType::TaskCenter, Direction::Up, id),
            buffer: Buffer::new(),
        }
    }

    pub fn input_positions(&self, acc: &Accessor<'_>) -> Vec<Position> {
        TASK_CENTER_INPUT_OFFSETS
            .iter()
            .filter_map(|offset| acc.relative_pos_by(*offset).ok())
            .collect()
    }

    pub fn input(&mut self, source: &mut Buffer, offer: &Capability) -> u64 {
        source.transfer_into(&mut self.buffer, &offer.merge(&Capability::any()))
    }

    pub fn update(&mut self, acc: &mut Accessor<'_>) {
        if self.buffer.is_empty() {
            return;
        }
        let delivered = self.buffer.take();
        let credited = acc.economy_mut().deposit(delivered);
        tracing::trace!("Task center {} credited {}", self.info.id, credited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::rect_offsets;

    #[test]
    fn test_input_offsets_ring_the_footprint() {
        let info = BuildingInfo::new(BuildingType::TaskCenter, Direction::Up, BuildingId(0));
        let footprint = rect_offsets(info.relative_rect());

        for offset in TASK_CENTER_INPUT_OFFSETS {
            assert!(!footprint.contains(&offset));
            let touches = footprint.iter().any(|cell| {
                (cell.row - offset.row).abs() + (cell.col - offset.col).abs() == 1
            });
            assert!(touches, "{:?} is not adjacent to the footprint", offset);
        }
    }
}
