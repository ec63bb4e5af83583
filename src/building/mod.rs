//! Building layer - machines that live on the grid
//!
//! Buildings form a closed set of variants. Each variant keeps its own buffers
//! and progress counters; the shared operations (info, footprint, input
//! negotiation, per-tick update) dispatch over the enum. Multi-cell buildings
//! occupy one anchor cell holding the real instance and fill the rest of their
//! rectangle with `PlaceHolder`s that point back at the anchor.

pub mod belt;
pub mod cutter;
pub mod miner;
pub mod placeholder;
pub mod task_center;
pub mod trash_can;

pub use belt::Belt;
pub use cutter::Cutter;
pub use miner::Miner;
pub use placeholder::PlaceHolder;
pub use task_center::TaskCenter;
pub use trash_can::TrashCan;

use crate::core::types::{BuildingId, Direction, Offset, Position};
use crate::grid::accessor::Accessor;
use crate::items::{Buffer, Capability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    Miner,
    Belt,
    Cutter,
    TrashCan,
    TaskCenter,
    PlaceHolder,
}

impl BuildingType {
    /// Nominal (width, height) when facing up
    pub fn nominal_size(&self) -> (usize, usize) {
        match self {
            BuildingType::Miner => (1, 1),
            BuildingType::Belt => (1, 1),
            BuildingType::Cutter => (2, 1),
            BuildingType::TrashCan => (1, 1),
            BuildingType::TaskCenter => (2, 2),
            BuildingType::PlaceHolder => (1, 1),
        }
    }

    /// Types a player can place directly
    pub fn placeable() -> [BuildingType; 5] {
        [
            BuildingType::Miner,
            BuildingType::Belt,
            BuildingType::Cutter,
            BuildingType::TrashCan,
            BuildingType::TaskCenter,
        ]
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildingType::Miner => "miner",
            BuildingType::Belt => "belt",
            BuildingType::Cutter => "cutter",
            BuildingType::TrashCan => "trashcan",
            BuildingType::TaskCenter => "taskcenter",
            BuildingType::PlaceHolder => "placeholder",
        };
        f.write_str(name)
    }
}

/// Identity and geometry shared by every building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInfo {
    #[serde(rename = "type")]
    pub kind: BuildingType,
    /// Nominal (width, height)
    pub size: (usize, usize),
    pub direction: Direction,
    pub id: BuildingId,
}

impl BuildingInfo {
    pub fn new(kind: BuildingType, direction: Direction, id: BuildingId) -> Self {
        Self {
            kind,
            size: kind.nominal_size(),
            direction,
            id,
        }
    }

    /// (width, height) on the grid; rotated a quarter turn when facing sideways
    pub fn footprint(&self) -> (usize, usize) {
        let (w, h) = self.size;
        if w == h || !self.direction.is_horizontal() {
            (w, h)
        } else {
            (h, w)
        }
    }

    /// Far corner of the occupied rectangle relative to the anchor (exclusive).
    ///
    /// The rectangle grows to the right of the facing by the width and
    /// backwards from the facing by the height.
    pub fn relative_rect(&self) -> Offset {
        let (w, h) = self.size;
        self.direction.right_of().offset() * w as isize
            + self.direction.opposite().offset() * h as isize
    }

    /// Offsets of every occupied cell, anchor `(0, 0)` first, in row/column order
    pub fn cell_offsets(&self) -> Vec<Offset> {
        rect_offsets(self.relative_rect())
    }
}

/// Cartesian product of `0..to.row` and `0..to.col`, each stepping toward its sign
pub fn rect_offsets(to: Offset) -> Vec<Offset> {
    fn steps(t: isize) -> impl Iterator<Item = isize> {
        let sign = t.signum();
        (0..t.abs()).map(move |d| d * sign)
    }

    steps(to.row)
        .flat_map(|row| steps(to.col).map(move |col| Offset::new(row, col)))
        .collect()
}

/// A placed machine. Placeholders are not buildings; see `grid::Occupant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Building {
    Miner(Miner),
    Belt(Belt),
    Cutter(Cutter),
    TrashCan(TrashCan),
    TaskCenter(TaskCenter),
}

impl Building {
    /// Construct a fresh building of the given type. Returns `None` for
    /// `PlaceHolder`, which only the grid creates.
    pub fn new(kind: BuildingType, direction: Direction, id: BuildingId) -> Option<Self> {
        let building = match kind {
            BuildingType::Miner => Building::Miner(Miner::new(direction, id)),
            BuildingType::Belt => Building::Belt(Belt::new(direction, id)),
            BuildingType::Cutter => Building::Cutter(Cutter::new(direction, id)),
            BuildingType::TrashCan => Building::TrashCan(TrashCan::new(direction, id)),
            BuildingType::TaskCenter => Building::TaskCenter(TaskCenter::new(id)),
            BuildingType::PlaceHolder => return None,
        };
        Some(building)
    }

    pub fn info(&self) -> &BuildingInfo {
        match self {
            Building::Miner(b) => &b.info,
            Building::Belt(b) => &b.info,
            Building::Cutter(b) => &b.info,
            Building::TrashCan(b) => &b.info,
            Building::TaskCenter(b) => &b.info,
        }
    }

    pub fn kind(&self) -> BuildingType {
        self.info().kind
    }

    pub fn id(&self) -> BuildingId {
        self.info().id
    }

    pub fn direction(&self) -> Direction {
        self.info().direction
    }

    pub fn footprint(&self) -> (usize, usize) {
        self.info().footprint()
    }

    pub fn relative_rect(&self) -> Offset {
        self.info().relative_rect()
    }

    /// Cells a producer must stand on for this building to accept its items
    pub fn input_positions(&self, acc: &Accessor<'_>) -> Vec<Position> {
        match self {
            Building::Miner(_) => Vec::new(),
            Building::Belt(b) => b.input_positions(acc),
            Building::Cutter(b) => b.input_positions(acc),
            Building::TrashCan(b) => b.input_positions(acc),
            Building::TaskCenter(b) => b.input_positions(acc),
        }
    }

    /// Take items from `source`, bounded by `offer` merged with what this
    /// building can handle. Returns units moved out of `source`.
    pub fn input(&mut self, acc: &mut Accessor<'_>, source: &mut Buffer, offer: &Capability) -> u64 {
        match self {
            Building::Miner(_) => 0,
            Building::Belt(b) => b.input(acc, source, offer),
            Building::Cutter(b) => b.input(source, offer),
            Building::TrashCan(b) => b.input(source, offer),
            Building::TaskCenter(b) => b.input(source, offer),
        }
    }

    /// Advance internal state by one tick
    pub fn update(&mut self, acc: &mut Accessor<'_>) {
        match self {
            Building::Miner(b) => b.update(acc),
            Building::Belt(b) => b.update(acc),
            Building::Cutter(b) => b.update(acc),
            Building::TrashCan(_) => {}
            Building::TaskCenter(b) => b.update(acc),
        }
    }
}
