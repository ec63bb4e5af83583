//! Cutter - splits iron ore into iron and stone
//!
//! The cutter is two cells wide: the anchor plus the cell to the right of its
//! facing. Ore enters behind the anchor. Each product leaves through its own
//! port ahead of the machine: iron ahead of the anchor, stone ahead of the
//! second cell.

use crate::building::{BuildingInfo, BuildingType};
use crate::core::types::{BuildingId, Direction, Position};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability, Item, IRON, IRON_ORE, STONE};
use serde::{Deserialize, Serialize};

/// Products of one cut, in port order
pub const CUTTER_OUTPUTS: [Item; 2] = [IRON, STONE];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutter {
    pub info: BuildingInfo,
    #[serde(rename = "in")]
    pub input: Buffer,
    #[serde(rename = "out")]
    pub output: Buffer,
}

impl Cutter {
    pub fn new(direction: Direction, id: BuildingId) -> Self {
        Self {
            info: BuildingInfo::new(BuildingType::Cutter, direction, id),
            input: Buffer::new(),
            output: Buffer::new(),
        }
    }

    /// Only raw iron ore can be cut
    pub fn processing_capability() -> Capability {
        Capability::only(IRON_ORE)
    }

    pub fn input_positions(&self, acc: &Accessor<'_>) -> Vec<Position> {
        acc.relative_pos_by(self.info.direction.opposite().offset())
            .ok()
            .into_iter()
            .collect()
    }

    pub fn input(&mut self, source: &mut Buffer, offer: &Capability) -> u64 {
        let capability = offer.merge(&Self::processing_capability());
        source.transfer_into(&mut self.input, &capability)
    }

    /// Cut a batch once the previous products have all left, then try both ports
    pub fn update(&mut self, acc: &mut Accessor<'_>) {
        if self.output.is_empty() {
            let batch = self
                .input
                .get(&IRON_ORE)
                .min(acc.efficiency().cutter_batch());
            if batch > 0 {
                self.input.remove(&IRON_ORE, batch);
                for product in CUTTER_OUTPUTS {
                    self.output.add(product, batch);
                }
            }
        }

        if self.output.is_empty() {
            return;
        }

        let direction = self.info.direction;
        let anchor = acc.position();
        let ports = [
            Some(anchor),
            anchor.checked_add(direction.right_of().offset()),
        ];

        for (port, product) in ports.into_iter().zip(CUTTER_OUTPUTS) {
            let Some(from) = port else { continue };
            let offer = Capability::custom(self.output.clone()).merge(&Capability::only(product));
            let moved = acc.push(from, direction.offset(), &mut self.output, &offer);
            if moved > 0 {
                tracing::trace!("Cutter {} port {} pushed {} units", self.info.id, from, moved);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::GOLD;

    #[test]
    fn test_cutter_rejects_everything_but_iron_ore() {
        let mut cutter = Cutter::new(Direction::Up, BuildingId(1));
        let mut source: Buffer = [(IRON_ORE, 3), (GOLD, 2)].into_iter().collect();

        let moved = cutter.input(&mut source, &Capability::any());

        assert_eq!(moved, 3);
        assert_eq!(cutter.input.get(&IRON_ORE), 3);
        assert_eq!(source.get(&GOLD), 2);
        assert_eq!(cutter.input.get(&GOLD), 0);
    }

    #[test]
    fn test_offer_bounds_cutter_input() {
        let mut cutter = Cutter::new(Direction::Up, BuildingId(1));
        let mut source: Buffer = [(IRON_ORE, 9)].into_iter().collect();
        let offer = Capability::custom([(IRON_ORE, 4)].into_iter().collect());

        assert_eq!(cutter.input(&mut source, &offer), 4);
        assert_eq!(source.get(&IRON_ORE), 5);
    }
}
