//! Accessor - short-lived view of one grid position
//!
//! An accessor pairs an absolute position with mutable borrows of the map and
//! the economy. Buildings receive one during `update` and use it to read their
//! chunk, find neighbours and push items. Relocated accessors reborrow from the
//! original, so only one is usable at a time.

use crate::building::Building;
use crate::core::error::{EngineError, Result};
use crate::core::types::{Offset, Position};
use crate::economy::{Economy, Efficiency};
use crate::grid::chunk::{Chunk, Occupant};
use crate::grid::map::Map;
use crate::items::{Buffer, Capability};

pub struct Accessor<'a> {
    position: Position,
    map: &'a mut Map,
    economy: &'a mut Economy,
}

impl<'a> Accessor<'a> {
    /// Bind to `position`, which must lie on the map
    pub fn new(position: Position, map: &'a mut Map, economy: &'a mut Economy) -> Result<Self> {
        map.get(position)?;
        Ok(Self::within(position, map, economy))
    }

    /// Bind to a position already known to be on the map
    pub(crate) fn within(position: Position, map: &'a mut Map, economy: &'a mut Economy) -> Self {
        Self {
            position,
            map,
            economy,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn map(&self) -> &Map {
        &*self.map
    }

    pub fn economy(&self) -> &Economy {
        &*self.economy
    }

    pub fn economy_mut(&mut self) -> &mut Economy {
        &mut *self.economy
    }

    pub fn efficiency(&self) -> &Efficiency {
        &self.economy.efficiency
    }

    pub fn current_chunk(&self) -> &Chunk {
        self.map.chunk_at(self.position)
    }

    /// Absolute position at `offset` from here. Never wraps.
    pub fn relative_pos_by(&self, offset: Offset) -> Result<Position> {
        self.map.offset_position(self.position, offset)
    }

    pub fn get_chunk(&self, offset: Offset) -> Result<&Chunk> {
        let pos = self.relative_pos_by(offset)?;
        Ok(self.map.chunk_at(pos))
    }

    /// Rebind this accessor to another absolute position
    pub fn relocate(&mut self, position: Position) -> Result<()> {
        self.map.get(position)?;
        self.position = position;
        Ok(())
    }

    /// Fresh accessor at an absolute position, borrowing from this one
    pub fn at(&mut self, position: Position) -> Result<Accessor<'_>> {
        Accessor::new(position, &mut *self.map, &mut *self.economy)
    }

    /// Fresh accessor at `offset` from here; its `current_chunk` is the neighbour
    pub fn neighbor(&mut self, offset: Offset) -> Result<Accessor<'_>> {
        let pos = self.relative_pos_by(offset)?;
        Ok(Accessor::within(pos, &mut *self.map, &mut *self.economy))
    }

    /// Cells from which the occupant here accepts items. Placeholders answer
    /// for their anchor.
    pub fn input_positions(&mut self) -> Vec<Position> {
        match self.current_chunk().occupant() {
            Occupant::Empty => Vec::new(),
            Occupant::Anchor(_) => self.anchored_input_positions(),
            Occupant::Linked(placeholder) => {
                let placeholder = *placeholder;
                placeholder.input_positions(self)
            }
        }
    }

    /// Offer `source` to the occupant here. Returns units moved.
    pub fn input(&mut self, source: &mut Buffer, offer: &Capability) -> u64 {
        match self.current_chunk().occupant() {
            Occupant::Empty => 0,
            Occupant::Anchor(_) => self.anchored_input(source, offer),
            Occupant::Linked(placeholder) => {
                let placeholder = *placeholder;
                placeholder.input(self, source, offer)
            }
        }
    }

    /// Input positions of the building anchored exactly here
    pub(crate) fn anchored_input_positions(&self) -> Vec<Position> {
        match self.current_chunk().building() {
            Some(building) => building.input_positions(self),
            None => Vec::new(),
        }
    }

    /// Input into the building anchored exactly here. The building is lifted
    /// out of its chunk for the duration of the call.
    pub(crate) fn anchored_input(&mut self, source: &mut Buffer, offer: &Capability) -> u64 {
        let pos = self.position;
        let Some(mut building) = self.map.chunk_at_mut(pos).take_building() else {
            return 0;
        };
        let moved = building.input(self, source, offer);
        self.map.chunk_at_mut(pos).restore_building(building);
        moved
    }

    /// Push from the cell `from` toward `from + offset`.
    ///
    /// The consumer must list `from` among its input positions; otherwise, or
    /// when the target is off the map or empty, nothing moves.
    pub fn push(
        &mut self,
        from: Position,
        offset: Offset,
        source: &mut Buffer,
        offer: &Capability,
    ) -> u64 {
        let Ok(target) = self.map.offset_position(from, offset) else {
            return 0;
        };
        let mut consumer = Accessor::within(target, &mut *self.map, &mut *self.economy);
        if !consumer.current_chunk().is_occupied() {
            return 0;
        }
        if !consumer.input_positions().contains(&from) {
            return 0;
        }
        consumer.input(source, offer)
    }

    /// Place `building` with its anchor here.
    ///
    /// The whole footprint is checked before anything is written: any cell off
    /// the map fails with `OutOfBounds`, any occupied cell with `OccupiedCell`.
    /// Returns every covered position, anchor first.
    pub fn add_machine(&mut self, building: Building) -> Result<Vec<Position>> {
        let anchor = self.position;
        let mut cells = Vec::new();
        for offset in building.info().cell_offsets() {
            let pos = self.relative_pos_by(offset)?;
            if self.map.chunk_at(pos).is_occupied() {
                return Err(EngineError::OccupiedCell(pos));
            }
            cells.push(pos);
        }

        for pos in cells.iter().skip(1) {
            self.map.link(*pos, anchor, &building);
        }
        tracing::debug!(
            "Placed {} {} at {} covering {} cells",
            building.kind(),
            building.id(),
            anchor,
            cells.len()
        );
        self.map.chunk_at_mut(anchor).restore_building(building);
        Ok(cells)
    }

    /// Remove the building anchored here along with its placeholders.
    /// Returns every cleared position, anchor first.
    pub fn remove_machine(&mut self) -> Result<Vec<Position>> {
        let anchor = self.position;
        let Some(building) = self.map.chunk_at_mut(anchor).take_building() else {
            return Err(EngineError::EmptyCellRemoval(anchor));
        };

        let mut cleared = vec![anchor];
        for offset in building.info().cell_offsets().into_iter().skip(1) {
            let Ok(pos) = self.relative_pos_by(offset) else {
                continue;
            };
            let chunk = self.map.chunk_at_mut(pos);
            let linked_here = chunk
                .placeholder()
                .and_then(|p| p.anchor_from(pos))
                .map_or(false, |a| a == anchor);
            if linked_here {
                chunk.clear();
                cleared.push(pos);
            }
        }

        tracing::debug!("Removed {} {} from {}", building.kind(), building.id(), anchor);
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::BuildingType;
    use crate::core::types::{BuildingId, Direction};
    use crate::items::{IRON_ORE, STONE};

    fn place(map: &mut Map, economy: &mut Economy, pos: Position, kind: BuildingType, d: Direction) -> Result<Vec<Position>> {
        let building = Building::new(kind, d, BuildingId(1)).unwrap();
        Accessor::new(pos, map, economy)?.add_machine(building)
    }

    #[test]
    fn test_relative_pos_never_wraps() {
        let mut map = Map::empty(3, 3);
        let mut economy = Economy::new();
        let acc = Accessor::new(Position::new(0, 2), &mut map, &mut economy).unwrap();
        assert_eq!(acc.relative_pos_by(Offset::new(1, -2)).unwrap(), Position::new(1, 0));
        assert!(acc.relative_pos_by(Offset::new(-1, 0)).is_err());
        assert!(acc.relative_pos_by(Offset::new(0, 1)).is_err());
    }

    #[test]
    fn test_accessor_rejects_off_map_position() {
        let mut map = Map::empty(2, 2);
        let mut economy = Economy::new();
        assert!(Accessor::new(Position::new(2, 0), &mut map, &mut economy).is_err());
        let mut acc = Accessor::new(Position::new(1, 1), &mut map, &mut economy).unwrap();
        assert!(acc.relocate(Position::new(0, 5)).is_err());
        assert_eq!(acc.position(), Position::new(1, 1));
    }

    #[test]
    fn test_cutter_placement_links_second_cell() {
        let mut map = Map::empty(5, 5);
        let mut economy = Economy::new();
        let cells = place(&mut map, &mut economy, Position::new(2, 2), BuildingType::Cutter, Direction::Right).unwrap();

        assert_eq!(cells, vec![Position::new(2, 2), Position::new(3, 2)]);
        let linked = map.get(Position::new(3, 2)).unwrap().placeholder().copied().unwrap();
        assert_eq!(linked.anchor_from(Position::new(3, 2)), Some(Position::new(2, 2)));
        assert_eq!(map.anchor_of(Position::new(3, 2)).unwrap(), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_placement_is_atomic() {
        let mut map = Map::empty(4, 4);
        let mut economy = Economy::new();
        place(&mut map, &mut economy, Position::new(1, 1), BuildingType::Belt, Direction::Up).unwrap();

        let err = place(&mut map, &mut economy, Position::new(0, 0), BuildingType::TaskCenter, Direction::Up)
            .unwrap_err();
        assert!(matches!(err, EngineError::OccupiedCell(p) if p == Position::new(1, 1)));
        for pos in [Position::new(0, 0), Position::new(0, 1), Position::new(1, 0)] {
            assert!(!map.get(pos).unwrap().is_occupied());
        }

        let err = place(&mut map, &mut economy, Position::new(3, 3), BuildingType::TaskCenter, Direction::Up)
            .unwrap_err();
        assert!(matches!(err, EngineError::OutOfBounds { .. }));
        assert!(!map.get(Position::new(3, 3)).unwrap().is_occupied());
    }

    #[test]
    fn test_remove_requires_anchor() {
        let mut map = Map::empty(3, 3);
        let mut economy = Economy::new();
        let mut acc = Accessor::new(Position::new(0, 0), &mut map, &mut economy).unwrap();
        assert!(matches!(acc.remove_machine(), Err(EngineError::EmptyCellRemoval(_))));

        place(&mut map, &mut economy, Position::new(0, 0), BuildingType::Cutter, Direction::Up).unwrap();
        let mut acc = Accessor::new(Position::new(0, 1), &mut map, &mut economy).unwrap();
        assert!(matches!(acc.remove_machine(), Err(EngineError::EmptyCellRemoval(_))));

        let mut acc = Accessor::new(Position::new(0, 0), &mut map, &mut economy).unwrap();
        assert_eq!(
            acc.remove_machine().unwrap(),
            vec![Position::new(0, 0), Position::new(0, 1)]
        );
        assert!(map.iter().all(|(_, c)| !c.is_occupied()));
    }

    #[test]
    fn test_push_requires_mutual_acceptance() {
        let mut map = Map::empty(3, 3);
        let mut economy = Economy::new();
        // Belt at (1,1) facing Right loads only from (1,0)
        place(&mut map, &mut economy, Position::new(1, 1), BuildingType::Belt, Direction::Right).unwrap();

        let mut source: Buffer = [(IRON_ORE, 3)].into_iter().collect();
        let mut acc = Accessor::new(Position::new(0, 1), &mut map, &mut economy).unwrap();
        let here = acc.position();
        assert_eq!(acc.push(here, Direction::Down.offset(), &mut source, &Capability::any()), 0);
        assert_eq!(source.get(&IRON_ORE), 3);

        let mut acc = Accessor::new(Position::new(1, 0), &mut map, &mut economy).unwrap();
        let here = acc.position();
        assert_eq!(acc.push(here, Direction::Right.offset(), &mut source, &Capability::any()), 3);
        assert!(source.is_empty());
    }

    #[test]
    fn test_push_through_placeholder_reaches_anchor() {
        let mut map = Map::empty(4, 4);
        let mut economy = Economy::new();
        place(&mut map, &mut economy, Position::new(1, 1), BuildingType::TaskCenter, Direction::Up).unwrap();

        // (2,0) feeds the placeholder at (2,1)
        let mut source: Buffer = [(STONE, 5)].into_iter().collect();
        let mut acc = Accessor::new(Position::new(2, 0), &mut map, &mut economy).unwrap();
        let here = acc.position();
        assert_eq!(acc.push(here, Direction::Right.offset(), &mut source, &Capability::any()), 5);

        match map.get(Position::new(1, 1)).unwrap().building() {
            Some(Building::TaskCenter(tc)) => assert_eq!(tc.buffer.get(&STONE), 5),
            other => panic!("expected task center, got {:?}", other),
        }
    }

    #[test]
    fn test_push_off_map_is_noop() {
        let mut map = Map::empty(1, 1);
        let mut economy = Economy::new();
        let mut source: Buffer = [(IRON_ORE, 1)].into_iter().collect();
        let mut acc = Accessor::new(Position::new(0, 0), &mut map, &mut economy).unwrap();
        assert_eq!(acc.push(Position::new(0, 0), Offset::new(0, 1), &mut source, &Capability::any()), 0);
        assert_eq!(source.get(&IRON_ORE), 1);
    }
}
