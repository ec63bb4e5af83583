//! Canned layouts for demos, benches and smoke tests

use crate::building::BuildingType;
use crate::core::error::Result;
use crate::core::types::{Direction, Position};
use crate::items::{Buffer, IRON, IRON_ORE};
use crate::simulation::State;

/// Columns a production line needs to the right of its miner
const LINE_WIDTH: usize = 6;

/// Build a full production line facing right, anchored at `origin`:
///
/// ```text
/// M > C > T T
///       C > T T
/// ```
///
/// The miner feeds a belt into a cutter; iron and stone each ride a belt into
/// a task center. `origin` must hold iron ore for the line to produce.
pub fn build_production_line(state: &mut State, origin: Position) -> Result<Vec<Position>> {
    let at = |dc: usize, dr: usize| Position::new(origin.row + dr, origin.col + dc);
    let mut cells = Vec::new();
    cells.extend(state.build(at(0, 0), BuildingType::Miner, Direction::Right)?);
    cells.extend(state.build(at(1, 0), BuildingType::Belt, Direction::Right)?);
    cells.extend(state.build(at(2, 0), BuildingType::Cutter, Direction::Right)?);
    cells.extend(state.build(at(3, 0), BuildingType::Belt, Direction::Right)?);
    cells.extend(state.build(at(3, 1), BuildingType::Belt, Direction::Right)?);
    cells.extend(state.build(at(4, 0), BuildingType::TaskCenter, Direction::Up)?);
    Ok(cells)
}

/// First iron ore deposit, row-major, with room for a production line
pub fn find_line_origin(state: &State) -> Option<Position> {
    let map = state.map();
    map.iter()
        .filter(|(pos, chunk)| {
            chunk.ore() == Some(&IRON_ORE)
                && pos.row + 1 < map.height()
                && pos.col + LINE_WIDTH <= map.width()
        })
        .map(|(pos, _)| pos)
        .find(|pos| {
            (0..2).all(|dr| {
                (0..LINE_WIDTH).all(|dc| {
                    map.get(Position::new(pos.row + dr, pos.col + dc))
                        .map_or(false, |c| !c.is_occupied())
                })
            })
        })
}

/// Place a production line wherever it fits and register a starter task.
/// Returns the line origin, or `None` when no deposit has room.
pub fn build_demo(state: &mut State) -> Result<Option<Position>> {
    let Some(origin) = find_line_origin(state) else {
        tracing::warn!("No iron ore deposit with room for a production line");
        return Ok(None);
    };
    build_production_line(state, origin)?;
    let target: Buffer = [(IRON, 10)].into_iter().collect();
    state.add_task(target);
    tracing::debug!("Demo line built at {}", origin);
    Ok(Some(origin))
}
