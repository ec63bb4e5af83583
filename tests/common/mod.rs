//! Shared helpers for integration tests

#![allow(dead_code)]

use oreflow::building::Building;
use oreflow::core::Position;
use oreflow::grid::{Chunk, Map};
use oreflow::items::{Buffer, Item};
use oreflow::State;

/// Map without random ore, with deposits only where listed
pub fn map_with_ore(height: usize, width: usize, deposits: &[(Position, Item)]) -> Map {
    let chunks = (0..height * width)
        .map(|i| {
            let pos = Position::new(i / width, i % width);
            let ore = deposits
                .iter()
                .find(|(p, _)| *p == pos)
                .map(|(_, item)| item.clone());
            Chunk::with_ore(ore)
        })
        .collect();
    Map::from_chunks(height, width, chunks).unwrap()
}

pub fn building_at(state: &State, pos: Position) -> &Building {
    state
        .map()
        .get(pos)
        .unwrap()
        .building()
        .unwrap_or_else(|| panic!("no building anchored at {}", pos))
}

/// Every buffer a building holds
pub fn buffers_of(building: &Building) -> Vec<&Buffer> {
    match building {
        Building::Miner(b) => vec![&b.ores],
        Building::Belt(b) => vec![&b.buffer],
        Building::Cutter(b) => vec![&b.input, &b.output],
        Building::TrashCan(_) => vec![],
        Building::TaskCenter(b) => vec![&b.buffer],
    }
}

/// Units of `item` anywhere on the map or in the store
pub fn total_of(state: &State, item: &Item) -> u64 {
    let on_map: u64 = state
        .map()
        .buildings()
        .flat_map(|(_, b)| buffers_of(b))
        .map(|buffer| buffer.get(item))
        .sum();
    on_map + state.store().get(item)
}

pub fn belt_contents(state: &State, pos: Position) -> (u32, Buffer) {
    match building_at(state, pos) {
        Building::Belt(b) => (b.progress, b.buffer.clone()),
        other => panic!("expected belt at {}, got {:?}", pos, other.kind()),
    }
}

pub fn miner_contents(state: &State, pos: Position) -> Buffer {
    match building_at(state, pos) {
        Building::Miner(b) => b.ores.clone(),
        other => panic!("expected miner at {}, got {:?}", pos, other.kind()),
    }
}
