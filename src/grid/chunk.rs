//! Chunk - one grid cell with an optional ore deposit and an occupant

use crate::building::{
    Belt, Building, BuildingInfo, BuildingType, Cutter, Miner, PlaceHolder, TaskCenter, TrashCan,
};
use crate::core::types::Direction;
use crate::items::Item;
use serde::{Deserialize, Serialize};

/// What stands on a cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<OccupantRecord>", into = "Option<OccupantRecord>")]
pub enum Occupant {
    #[default]
    Empty,
    /// The cell owning the real building instance
    Anchor(Building),
    /// A non-anchor cell of a multi-cell building
    Linked(PlaceHolder),
}

/// Persisted form of an occupant: a building record tagged by type, or a
/// placeholder record carrying the anchor offset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OccupantRecord {
    Miner(Miner),
    Belt(Belt),
    Cutter(Cutter),
    TrashCan(TrashCan),
    TaskCenter(TaskCenter),
    PlaceHolder(PlaceHolder),
}

impl From<Option<OccupantRecord>> for Occupant {
    fn from(record: Option<OccupantRecord>) -> Self {
        match record {
            None => Occupant::Empty,
            Some(OccupantRecord::Miner(b)) => Occupant::Anchor(Building::Miner(b)),
            Some(OccupantRecord::Belt(b)) => Occupant::Anchor(Building::Belt(b)),
            Some(OccupantRecord::Cutter(b)) => Occupant::Anchor(Building::Cutter(b)),
            Some(OccupantRecord::TrashCan(b)) => Occupant::Anchor(Building::TrashCan(b)),
            Some(OccupantRecord::TaskCenter(b)) => Occupant::Anchor(Building::TaskCenter(b)),
            Some(OccupantRecord::PlaceHolder(p)) => Occupant::Linked(p),
        }
    }
}

impl From<Occupant> for Option<OccupantRecord> {
    fn from(occupant: Occupant) -> Self {
        let record = match occupant {
            Occupant::Empty => return None,
            Occupant::Anchor(Building::Miner(b)) => OccupantRecord::Miner(b),
            Occupant::Anchor(Building::Belt(b)) => OccupantRecord::Belt(b),
            Occupant::Anchor(Building::Cutter(b)) => OccupantRecord::Cutter(b),
            Occupant::Anchor(Building::TrashCan(b)) => OccupantRecord::TrashCan(b),
            Occupant::Anchor(Building::TaskCenter(b)) => OccupantRecord::TaskCenter(b),
            Occupant::Linked(p) => OccupantRecord::PlaceHolder(p),
        };
        Some(record)
    }
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// Info of whatever stands here; placeholders report their own type
    pub fn info(&self) -> Option<BuildingInfo> {
        match self {
            Occupant::Empty => None,
            Occupant::Anchor(b) => Some(*b.info()),
            Occupant::Linked(p) => Some(p.info()),
        }
    }

    pub fn kind(&self) -> Option<BuildingType> {
        self.info().map(|info| info.kind)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.info().map(|info| info.direction)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Deposit fixed at generation time
    ore: Option<Item>,
    #[serde(default)]
    building: Occupant,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ore(ore: Option<Item>) -> Self {
        Self {
            ore,
            building: Occupant::Empty,
        }
    }

    pub fn ore(&self) -> Option<&Item> {
        self.ore.as_ref()
    }

    pub fn occupant(&self) -> &Occupant {
        &self.building
    }

    /// The building anchored here, if any
    pub fn building(&self) -> Option<&Building> {
        match &self.building {
            Occupant::Anchor(b) => Some(b),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&PlaceHolder> {
        match &self.building {
            Occupant::Linked(p) => Some(p),
            _ => None,
        }
    }

    /// True for anchors and placeholders alike
    pub fn is_occupied(&self) -> bool {
        !self.building.is_empty()
    }

    pub fn building_type(&self) -> Option<BuildingType> {
        self.building.kind()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.building.direction()
    }

    /// Lift the anchored building out of the cell, leaving it empty.
    /// Placeholders stay in place.
    pub(crate) fn take_building(&mut self) -> Option<Building> {
        match std::mem::take(&mut self.building) {
            Occupant::Anchor(b) => Some(b),
            other => {
                self.building = other;
                None
            }
        }
    }

    pub(crate) fn restore_building(&mut self, building: Building) {
        self.building = Occupant::Anchor(building);
    }

    pub(crate) fn set_occupant(&mut self, occupant: Occupant) {
        self.building = occupant;
    }

    pub(crate) fn clear(&mut self) {
        self.building = Occupant::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BuildingId, Offset};
    use crate::items::GOLD;

    #[test]
    fn test_take_and_restore() {
        let mut chunk = Chunk::with_ore(Some(GOLD));
        let miner = Building::new(BuildingType::Miner, Direction::Up, BuildingId(1)).unwrap();
        chunk.restore_building(miner.clone());

        let taken = chunk.take_building();
        assert_eq!(taken, Some(miner));
        assert!(!chunk.is_occupied());
        assert_eq!(chunk.ore(), Some(&GOLD));
    }

    #[test]
    fn test_take_leaves_placeholder() {
        let mut chunk = Chunk::new();
        chunk.set_occupant(Occupant::Linked(PlaceHolder::new(
            Direction::Right,
            Offset::new(-1, 0),
        )));
        assert!(chunk.take_building().is_none());
        assert_eq!(chunk.building_type(), Some(BuildingType::PlaceHolder));
    }

    #[test]
    fn test_chunk_json_layout() {
        let mut chunk = Chunk::new();
        assert_eq!(
            serde_json::to_value(&chunk).unwrap(),
            serde_json::json!({ "ore": null, "building": null })
        );

        chunk.set_occupant(Occupant::Linked(PlaceHolder::new(
            Direction::Right,
            Offset::new(-1, 0),
        )));
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["building"]["type"], "placeholder");
        assert_eq!(json["building"]["anchor"]["row"], -1);

        let back: Chunk = serde_json::from_value(json).unwrap();
        assert_eq!(back, chunk);
    }
}
