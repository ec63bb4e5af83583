//! Map - row-major grid of chunks
//!
//! The map owns every chunk and, through them, every building. Buildings are
//! updated in row-major order in a single pass, so a building earlier in the
//! order can hand items to a later one within the same tick.

use crate::building::{Building, BuildingType, PlaceHolder};
use crate::core::config::OreConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{BuildingId, Offset, Position};
use crate::economy::Economy;
use crate::grid::accessor::Accessor;
use crate::grid::chunk::{Chunk, Occupant};
use crate::items::ORES;
use rand::distributions::{Bernoulli, Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    height: usize,
    width: usize,
    chunks: Vec<Chunk>,
}

impl Map {
    /// Generate a map with the default ore distribution
    pub fn new(height: usize, width: usize, seed: u64) -> Result<Self> {
        Self::generate(height, width, seed, &OreConfig::default())
    }

    /// Seed ore deposits: a Bernoulli trial per chunk decides whether there is
    /// any ore, then a weighted draw picks which.
    pub fn generate(height: usize, width: usize, seed: u64, ore: &OreConfig) -> Result<Self> {
        let presence = Bernoulli::new(ore.presence_probability)
            .map_err(|e| EngineError::InvalidConfig(format!("ore presence: {}", e)))?;
        let kinds = WeightedIndex::new([ore.iron_ore_weight, ore.gold_weight])
            .map_err(|e| EngineError::InvalidConfig(format!("ore weights: {}", e)))?;

        let cells = cell_count(height, width)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut chunks = Vec::with_capacity(cells);
        for _ in 0..cells {
            let deposit = if presence.sample(&mut rng) {
                ORES.get(kinds.sample(&mut rng)).cloned()
            } else {
                None
            };
            chunks.push(Chunk::with_ore(deposit));
        }

        tracing::debug!("Generated {}x{} map from seed {}", height, width, seed);
        Ok(Self {
            height,
            width,
            chunks,
        })
    }

    /// Map without any ore. `height * width` must fit in `usize`.
    pub fn empty(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            chunks: vec![Chunk::new(); height * width],
        }
    }

    /// Assemble a map from row-major chunks
    pub fn from_chunks(height: usize, width: usize, chunks: Vec<Chunk>) -> Result<Self> {
        if chunks.len() != cell_count(height, width)? {
            return Err(EngineError::InvalidConfig(format!(
                "{} chunks cannot fill a {}x{} map",
                chunks.len(),
                height,
                width
            )));
        }
        Ok(Self {
            height,
            width,
            chunks,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn out_of_bounds(&self, row: isize, col: isize) -> EngineError {
        EngineError::OutOfBounds {
            row,
            col,
            height: self.height,
            width: self.width,
        }
    }

    /// `pos + offset`, failing if the result leaves the grid
    pub fn offset_position(&self, pos: Position, offset: Offset) -> Result<Position> {
        match pos.checked_add(offset) {
            Some(target) if self.contains(target) => Ok(target),
            _ => Err(self.out_of_bounds(
                pos.row as isize + offset.row,
                pos.col as isize + offset.col,
            )),
        }
    }

    /// Bounds-checked lookup
    pub fn get(&self, pos: Position) -> Result<&Chunk> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos.row as isize, pos.col as isize));
        }
        Ok(self.chunk_at(pos))
    }

    pub fn get_mut(&mut self, pos: Position) -> Result<&mut Chunk> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos.row as isize, pos.col as isize));
        }
        Ok(self.chunk_at_mut(pos))
    }

    /// Unchecked lookup; callers guarantee `pos` is on the grid
    pub(crate) fn chunk_at(&self, pos: Position) -> &Chunk {
        &self.chunks[pos.row * self.width + pos.col]
    }

    pub(crate) fn chunk_at_mut(&mut self, pos: Position) -> &mut Chunk {
        &mut self.chunks[pos.row * self.width + pos.col]
    }

    /// Chunks in row-major order with their positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Chunk)> + '_ {
        let width = self.width.max(1);
        self.chunks
            .iter()
            .enumerate()
            .map(move |(i, chunk)| (Position::new(i / width, i % width), chunk))
    }

    /// Every anchored building with its anchor position
    pub fn buildings(&self) -> impl Iterator<Item = (Position, &Building)> + '_ {
        self.iter()
            .filter_map(|(pos, chunk)| chunk.building().map(|b| (pos, b)))
    }

    /// Anchor position of whatever occupies `pos`: the cell itself for an
    /// anchor, the linked anchor for a placeholder, `None` when empty.
    pub fn anchor_of(&self, pos: Position) -> Result<Option<Position>> {
        let anchor = match self.get(pos)?.occupant() {
            Occupant::Empty => None,
            Occupant::Anchor(_) => Some(pos),
            Occupant::Linked(placeholder) => placeholder
                .anchor_from(pos)
                .filter(|anchor| self.contains(*anchor)),
        };
        Ok(anchor)
    }

    /// Building occupying `pos`, resolving placeholders
    pub fn building_at(&self, pos: Position) -> Result<Option<&Building>> {
        Ok(self
            .anchor_of(pos)?
            .and_then(|anchor| self.chunk_at(anchor).building()))
    }

    /// Largest building id on the map
    pub fn max_building_id(&self) -> Option<BuildingId> {
        self.buildings().map(|(_, b)| b.id()).max()
    }

    /// Restore the footprint links after loading.
    ///
    /// Placeholders without a covering anchor are cleared. Anchors get their
    /// missing placeholders back, unless part of the footprint is off the map
    /// or held by another building, in which case the anchor is dropped.
    /// Returns the cleared positions.
    pub fn repair_links(&mut self) -> Vec<Position> {
        let mut cleared = self.clear_dangling();

        let anchors: Vec<Position> = self.buildings().map(|(pos, _)| pos).collect();
        for anchor in anchors {
            let Some(building) = self.chunk_at(anchor).building() else {
                continue;
            };
            let (kind, id, direction) = (building.kind(), building.id(), building.direction());

            let mut missing = Vec::new();
            let mut intact = true;
            for offset in building.info().cell_offsets().into_iter().skip(1) {
                let Ok(pos) = self.offset_position(anchor, offset) else {
                    intact = false;
                    break;
                };
                match self.chunk_at(pos).occupant() {
                    Occupant::Empty => missing.push(pos),
                    Occupant::Linked(p) if p.anchor_from(pos) == Some(anchor) => {}
                    _ => {
                        intact = false;
                        break;
                    }
                }
            }

            if !intact {
                tracing::warn!("Dropping {} {} at {}: footprint is blocked", kind, id, anchor);
                self.chunk_at_mut(anchor).clear();
                cleared.push(anchor);
                continue;
            }
            for pos in missing {
                tracing::warn!("Relinking {} to {} {} at {}", pos, kind, id, anchor);
                let placeholder = PlaceHolder::linking(pos, anchor, direction);
                self.chunk_at_mut(pos).set_occupant(Occupant::Linked(placeholder));
            }
        }

        // Placeholders of dropped anchors
        cleared.extend(self.clear_dangling());
        cleared
    }

    /// Clear placeholders whose anchor no longer holds a building covering them
    fn clear_dangling(&mut self) -> Vec<Position> {
        let dangling: Vec<Position> = self
            .iter()
            .filter_map(|(pos, chunk)| {
                let placeholder = chunk.placeholder()?;
                let covered = placeholder
                    .anchor_from(pos)
                    .filter(|anchor| self.contains(*anchor))
                    .and_then(|anchor| self.chunk_at(anchor).building())
                    .map_or(false, |b| b.info().cell_offsets().contains(&-placeholder.anchor));
                (!covered).then_some(pos)
            })
            .collect();

        for pos in &dangling {
            tracing::warn!("Clearing placeholder at {} with no anchor", pos);
            self.chunk_at_mut(*pos).clear();
        }
        dangling
    }

    /// Update every building once, row-major. Each building is lifted out of
    /// its chunk while it runs so it can reach neighbours through an accessor.
    pub fn update(&mut self, economy: &mut Economy) {
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);
                let Some(mut building) = self.chunk_at_mut(pos).take_building() else {
                    continue;
                };
                {
                    let mut acc = Accessor::within(pos, self, economy);
                    building.update(&mut acc);
                }
                self.chunk_at_mut(pos).restore_building(building);
            }
        }
    }

    /// Install a placeholder; used by placement only
    pub(crate) fn link(&mut self, pos: Position, anchor: Position, building: &Building) {
        let placeholder = PlaceHolder::linking(pos, anchor, building.direction());
        self.chunk_at_mut(pos).set_occupant(Occupant::Linked(placeholder));
    }

    /// Count anchored buildings per type
    pub fn census(&self) -> Vec<(BuildingType, usize)> {
        BuildingType::placeable()
            .into_iter()
            .map(|kind| (kind, self.buildings().filter(|(_, b)| b.kind() == kind).count()))
            .collect()
    }
}

/// Number of cells in a `height` x `width` map
fn cell_count(height: usize, width: usize) -> Result<usize> {
    height.checked_mul(width).ok_or_else(|| {
        EngineError::InvalidConfig(format!("a {}x{} map is too large", height, width))
    })
}
