//! Items and the fixed item catalog

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// An immutable item kind. Ordered by name, then by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item {
    pub name: Cow<'static, str>,
    /// Currency credited per unit delivered to a task center
    pub value: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            value,
        }
    }

    /// Const constructor for catalog entries
    pub const fn from_static(name: &'static str, value: i64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// Raw ores, found in deposits
pub const IRON_ORE: Item = Item::from_static("iron ore", 30);
pub const GOLD: Item = Item::from_static("gold", 60);

// Refined products of the cutter
pub const IRON: Item = Item::from_static("iron", 40);
pub const STONE: Item = Item::from_static("stone", 1);

/// Ores that can be seeded into the map, in generation-weight order
pub const ORES: [Item; 2] = [IRON_ORE, GOLD];

/// Every item the simulation knows about
pub fn catalog() -> [Item; 4] {
    [IRON_ORE, GOLD, IRON, STONE]
}
