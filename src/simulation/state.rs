//! State - one game: the map, its economy, tasks and the tick loop
//!
//! Hosts drive a game through this type only. Placement, removal, task
//! registration and upgrades are the mutation entry points; `tick` advances
//! everything by one discrete step.

use crate::building::{Building, BuildingType};
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{BuildingId, Direction, Position, Tick};
use crate::economy::{Command, Economy, Efficiency, Global, Requirement, Task};
use crate::grid::{Accessor, Map};
use crate::items::Buffer;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    map: Map,
    economy: Economy,
    tasks: Vec<Task>,
    next_id: u64,
    /// Ticks run since this state was created or loaded
    tick: Tick,
}

impl State {
    /// Generate a fresh game with default ore distribution
    pub fn new(height: usize, width: usize, seed: u64) -> Result<Self> {
        Ok(Self::from_map(Map::new(height, width, seed)?))
    }

    /// Generate a fresh game from configuration
    pub fn generate(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let map = Map::generate(config.map.height, config.map.width, config.map.seed, &config.ore)?;
        Ok(Self::from_map(map))
    }

    /// Wrap an existing map; ids continue after the largest one on it
    pub fn from_map(map: Map) -> Self {
        let next_id = map.max_building_id().map_or(0, |id| id.0 + 1);
        Self {
            map,
            economy: Economy::new(),
            tasks: Vec::new(),
            next_id,
            tick: 0,
        }
    }

    pub(crate) fn from_parts(map: Map, economy: Economy, tasks: Vec<Task>, next_id: u64) -> Self {
        Self {
            map,
            economy,
            tasks,
            next_id,
            tick: 0,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn store(&self) -> &Buffer {
        &self.economy.store
    }

    pub fn efficiency(&self) -> &Efficiency {
        &self.economy.efficiency
    }

    /// Value credited by task centers and not yet settled with the profile
    pub fn pending_value(&self) -> i64 {
        self.economy.value
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_progress(&self, index: usize) -> Option<Vec<Requirement>> {
        self.tasks.get(index).map(|t| t.progress(&self.economy.store))
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Accessor bound to `pos`
    pub fn accessor(&mut self, pos: Position) -> Result<Accessor<'_>> {
        Accessor::new(pos, &mut self.map, &mut self.economy)
    }

    pub fn next_building_id(&mut self) -> BuildingId {
        let id = BuildingId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Construct and place a new building. Task centers ignore `direction`.
    pub fn build(
        &mut self,
        pos: Position,
        kind: BuildingType,
        direction: Direction,
    ) -> Result<Vec<Position>> {
        let id = BuildingId(self.next_id);
        let building = Building::new(kind, direction, id).ok_or(EngineError::NotPlaceable(kind))?;
        self.place(pos, building)
    }

    /// Place an already constructed building with its anchor at `pos`
    pub fn place(&mut self, pos: Position, building: Building) -> Result<Vec<Position>> {
        let id = building.id();
        let cells = self.accessor(pos)?.add_machine(building)?;
        self.next_id = self.next_id.max(id.0 + 1);
        Ok(cells)
    }

    /// Remove whatever building covers `pos`, anchor or placeholder
    pub fn remove_at(&mut self, pos: Position) -> Result<Vec<Position>> {
        let anchor = self
            .map
            .anchor_of(pos)?
            .ok_or(EngineError::EmptyCellRemoval(pos))?;
        self.accessor(anchor)?.remove_machine()
    }

    /// Register a quota on the store; returns its index
    pub fn add_task(&mut self, target: Buffer) -> usize {
        self.tasks.push(Task::new(target));
        self.tasks.len() - 1
    }

    /// Advance one step: update the map, settle value into `global`, then
    /// check tasks. `on_complete` runs once for each newly completed task.
    /// Returns the value credited this tick.
    pub fn tick<F>(&mut self, global: &mut Global, mut on_complete: F) -> i64
    where
        F: FnMut(usize, &Task),
    {
        self.map.update(&mut self.economy);

        let earned = self.economy.take_value();
        global.credit(earned);

        for (index, task) in self.tasks.iter_mut().enumerate() {
            if task.update(&self.economy.store) {
                tracing::info!("Task {} completed on tick {}", index, self.tick);
                on_complete(index, task);
            }
        }

        self.tick += 1;
        earned
    }

    /// Apply a host command. Returns the price paid.
    pub fn apply(&mut self, global: &mut Global, command: Command) -> Result<i64> {
        match command {
            Command::ApplyUpgrade { kind } => {
                let price = global.purchase(kind)?;
                self.economy.efficiency.raise(kind);
                Ok(price)
            }
        }
    }
}
