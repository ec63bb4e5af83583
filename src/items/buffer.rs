//! Buffer - per-item non-negative quantity ledger
//!
//! Every building that holds items, the economic store, and task targets are
//! all buffers. Counts never go below zero; a missing entry and a zero entry
//! mean the same thing.

use crate::items::capability::Capability;
use crate::items::item::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item -> count mapping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<BufferEntry>", into = "Vec<BufferEntry>")]
pub struct Buffer {
    items: BTreeMap<Item, u64>,
}

/// Persisted form of one buffer slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferEntry {
    pub item: Item,
    pub count: u64,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count of an item (0 if absent)
    pub fn get(&self, item: &Item) -> u64 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn set(&mut self, item: Item, count: u64) {
        self.items.insert(item, count);
    }

    /// Adjust a count by a signed amount, saturating at zero. Returns the new count.
    pub fn increase(&mut self, item: Item, delta: i64) -> u64 {
        let entry = self.items.entry(item).or_insert(0);
        *entry = if delta >= 0 {
            entry.saturating_add(delta.unsigned_abs())
        } else {
            entry.saturating_sub(delta.unsigned_abs())
        };
        *entry
    }

    pub fn add(&mut self, item: Item, count: u64) -> u64 {
        let entry = self.items.entry(item).or_insert(0);
        *entry = entry.saturating_add(count);
        *entry
    }

    /// Remove up to `count` units, returns amount actually removed
    pub fn remove(&mut self, item: &Item, count: u64) -> u64 {
        match self.items.get_mut(item) {
            Some(entry) => {
                let removed = count.min(*entry);
                *entry -= removed;
                removed
            }
            None => 0,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Snapshot the contents and leave this buffer empty
    pub fn take(&mut self) -> Buffer {
        std::mem::take(self)
    }

    /// Union with `other`; entries present in `other` overwrite ours
    pub fn merge(&mut self, other: Buffer) {
        self.items.extend(other.items);
    }

    /// Add every count in `other` to ours
    pub fn absorb(&mut self, other: Buffer) {
        for (item, count) in other.items {
            self.add(item, count);
        }
    }

    /// True when no item has a positive count
    pub fn is_empty(&self) -> bool {
        self.items.values().all(|&n| n == 0)
    }

    /// Iterate over items with a positive count, in item order
    pub fn iter(&self) -> impl Iterator<Item = (&Item, u64)> + '_ {
        self.items.iter().filter(|(_, &n)| n > 0).map(|(i, &n)| (i, n))
    }

    pub fn total_count(&self) -> u64 {
        self.items.values().fold(0u64, |total, n| total.saturating_add(*n))
    }

    /// Sum of item value times quantity
    pub fn total_value(&self) -> i64 {
        self.iter()
            .map(|(item, n)| item.value.saturating_mul(i64::try_from(n).unwrap_or(i64::MAX)))
            .fold(0i64, i64::saturating_add)
    }

    /// Check that we hold at least every quantity listed in `required`
    pub fn contains_all(&self, required: &Buffer) -> bool {
        required.iter().all(|(item, n)| self.get(item) >= n)
    }

    /// Copy of this buffer with every count capped at `ceiling`
    pub fn capped(&self, ceiling: u64) -> Buffer {
        self.iter()
            .map(|(item, n)| (item.clone(), n.min(ceiling)))
            .collect()
    }

    /// Move items into `dest`, bounded per item by `capability`.
    /// Returns the total number of units moved.
    pub fn transfer_into(&mut self, dest: &mut Buffer, capability: &Capability) -> u64 {
        let mut moved = 0;
        for (item, count) in self.items.iter_mut() {
            let amount = settle_amount(*count, capability.num_accepts(item));
            if amount > 0 {
                *count -= amount;
                dest.add(item.clone(), amount);
                moved += amount;
            }
        }
        moved
    }

    /// Remove items bounded per item by `capability` and drop them.
    /// Returns the total number of units destroyed.
    pub fn discard(&mut self, capability: &Capability) -> u64 {
        let mut dropped = 0;
        for (item, count) in self.items.iter_mut() {
            let amount = settle_amount(*count, capability.num_accepts(item));
            *count -= amount;
            dropped += amount;
        }
        dropped
    }
}

/// Units that move for one item: everything held when unbounded, else the bound
fn settle_amount(held: u64, bound: Option<u64>) -> u64 {
    bound.map_or(held, |b| b.min(held))
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Buffer {}

impl FromIterator<(Item, u64)> for Buffer {
    fn from_iter<T: IntoIterator<Item = (Item, u64)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<BufferEntry>> for Buffer {
    fn from(entries: Vec<BufferEntry>) -> Self {
        entries.into_iter().map(|e| (e.item, e.count)).collect()
    }
}

impl From<Buffer> for Vec<BufferEntry> {
    fn from(buffer: Buffer) -> Self {
        buffer
            .items
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(item, count)| BufferEntry { item, count })
            .collect()
    }
}
