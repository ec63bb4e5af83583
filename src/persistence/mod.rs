//! Persistence - JSON records for a game and for the global profile
//!
//! Encoding is plain serde. Decoding is best-effort: every top-level field is
//! read on its own, and a missing or malformed field falls back to its default
//! with a warning instead of failing the whole load. Text that is not a JSON
//! object at all yields a fresh record. Reading and writing files is left to
//! the host.

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::economy::global::MapSizeCap;
use crate::economy::{Economy, Efficiency, Global, PriceSchedule, Task};
use crate::grid::{Chunk, Map};
use crate::items::Buffer;
use crate::simulation::State;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map as JsonObject, Value};
use std::path::PathBuf;

/// Borrowed view of a game, in persisted field order
#[derive(Serialize)]
struct StateRecord<'a> {
    height: usize,
    width: usize,
    chunks: Vec<&'a Chunk>,
    efficiency: &'a Efficiency,
    store: &'a Buffer,
    value: i64,
    tasks: &'a [Task],
    next_id: u64,
}

pub fn encode_state(state: &State) -> Result<String> {
    let map = state.map();
    let record = StateRecord {
        height: map.height(),
        width: map.width(),
        chunks: map.iter().map(|(_, chunk)| chunk).collect(),
        efficiency: state.efficiency(),
        store: state.store(),
        value: state.pending_value(),
        tasks: state.tasks(),
        next_id: state.next_id(),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}

pub fn encode_global(global: &Global) -> Result<String> {
    Ok(serde_json::to_string_pretty(global)?)
}

/// Parse the top level; anything other than an object is unreadable
fn parse_object(text: &str, what: &str) -> Option<JsonObject<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(record)) => Some(record),
        Ok(_) => {
            tracing::warn!("{} record is not an object; starting fresh", what);
            None
        }
        Err(e) => {
            tracing::warn!("{} record is unreadable ({}); starting fresh", what, e);
            None
        }
    }
}

/// Decode one field, logging why it was unusable
fn field<T: DeserializeOwned>(record: &JsonObject<String, Value>, key: &str) -> Option<T> {
    let Some(value) = record.get(key) else {
        tracing::warn!("Field '{}' is missing; using default", key);
        return None;
    };
    match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!("Field '{}' is invalid ({}); using default", key, e);
            None
        }
    }
}

/// Rebuild the map from dimensions and chunks. Individual bad chunks become
/// empty; missing dimensions or a wrong chunk count discard the whole map.
fn decode_map(record: &JsonObject<String, Value>) -> Option<Map> {
    let height: usize = field(record, "height")?;
    let width: usize = field(record, "width")?;
    let raw: Vec<Value> = field(record, "chunks")?;

    let chunks = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Chunk>(value).unwrap_or_else(|e| {
                tracing::warn!("Chunk {} is invalid ({}); leaving it empty", index, e);
                Chunk::new()
            })
        })
        .collect();

    match Map::from_chunks(height, width, chunks) {
        Ok(mut map) => {
            map.repair_links();
            Some(map)
        }
        Err(e) => {
            tracing::warn!("Stored map is inconsistent ({}); generating a new one", e);
            None
        }
    }
}

fn decode_tasks(record: &JsonObject<String, Value>) -> Vec<Task> {
    let raw: Vec<Value> = field(record, "tasks").unwrap_or_default();
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Task>(value) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!("Dropping invalid task {} ({})", index, e);
                None
            }
        })
        .collect()
}

/// Decode a game. Only fails when the fallback map cannot be generated from
/// `config`.
pub fn decode_state(text: &str, config: &EngineConfig) -> Result<State> {
    let Some(record) = parse_object(text, "Game") else {
        return State::generate(config);
    };

    let map = match decode_map(&record) {
        Some(map) => map,
        None => Map::generate(config.map.height, config.map.width, config.map.seed, &config.ore)?,
    };

    let economy = Economy {
        efficiency: field(&record, "efficiency").unwrap_or_default(),
        store: field(&record, "store").unwrap_or_default(),
        value: field(&record, "value").unwrap_or_default(),
    };
    let tasks = decode_tasks(&record);

    let min_next_id = map.max_building_id().map_or(0, |id| id.0 + 1);
    let next_id = field::<u64>(&record, "next_id")
        .unwrap_or(min_next_id)
        .max(min_next_id);

    Ok(State::from_parts(map, economy, tasks, next_id))
}

/// Decode the global profile; never fails
pub fn decode_global(text: &str, config: &EngineConfig) -> Global {
    let fresh = Global::new(&config.progression);
    let Some(record) = parse_object(text, "Global") else {
        return fresh;
    };

    let saves: Vec<PathBuf> = field(&record, "saves").unwrap_or_default();
    let last_played = field::<Option<usize>>(&record, "last_played")
        .flatten()
        .filter(|index| {
            let known = *index < saves.len();
            if !known {
                tracing::warn!("Last played save {} is not registered; clearing", index);
            }
            known
        });

    Global {
        value: field(&record, "value").unwrap_or(fresh.value),
        last_played,
        map_size_cap: field::<MapSizeCap>(&record, "map_size_cap").unwrap_or(fresh.map_size_cap),
        prices: field::<PriceSchedule>(&record, "prices").unwrap_or_default(),
        saves,
    }
}
