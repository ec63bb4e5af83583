//! Capability - declarative bound on what a transfer may move
//!
//! A producer describes what it offers, a consumer describes what it can take,
//! and `merge` intersects the two. The merged capability decides per item how
//! many units change hands.

use crate::items::buffer::Buffer;
use crate::items::item::Item;
use ahash::AHashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    /// Accepts nothing
    None,
    /// Accepts any quantity of anything
    Any,
    /// Accepts up to the listed amount of each item, nothing else
    Custom(Buffer),
    /// Accepts any quantity, but only of the listed items
    Specific(AHashSet<Item>),
}

impl Capability {
    pub fn none() -> Self {
        Capability::None
    }

    pub fn any() -> Self {
        Capability::Any
    }

    pub fn custom(bounds: Buffer) -> Self {
        Capability::Custom(bounds)
    }

    pub fn specific(items: impl IntoIterator<Item = Item>) -> Self {
        Capability::Specific(items.into_iter().collect())
    }

    /// Unlimited quantity of a single item
    pub fn only(item: Item) -> Self {
        Self::specific([item])
    }

    /// Upper bound on units of `item`; `None` means unlimited
    pub fn num_accepts(&self, item: &Item) -> Option<u64> {
        match self {
            Capability::None => Some(0),
            Capability::Any => None,
            Capability::Custom(bounds) => Some(bounds.get(item)),
            Capability::Specific(items) => {
                if items.contains(item) {
                    None
                } else {
                    Some(0)
                }
            }
        }
    }

    /// Whether `quantity` units of `item` would be accepted in full
    pub fn accepts(&self, item: &Item, quantity: u64) -> bool {
        self.num_accepts(item).map_or(true, |bound| bound >= quantity)
    }

    /// Intersection of two allowances
    pub fn merge(&self, other: &Capability) -> Capability {
        match (self, other) {
            (Capability::None, _) | (_, Capability::None) => Capability::None,
            (Capability::Any, x) | (x, Capability::Any) => x.clone(),
            (Capability::Custom(a), Capability::Custom(b)) => Capability::Custom(
                a.iter()
                    .filter_map(|(item, n)| {
                        let bound = n.min(b.get(item));
                        (bound > 0).then(|| (item.clone(), bound))
                    })
                    .collect(),
            ),
            (Capability::Custom(bounds), Capability::Specific(items))
            | (Capability::Specific(items), Capability::Custom(bounds)) => Capability::Custom(
                bounds
                    .iter()
                    .filter(|(item, _)| items.contains(*item))
                    .map(|(item, n)| (item.clone(), n))
                    .collect(),
            ),
            (Capability::Specific(a), Capability::Specific(b)) => {
                Capability::Specific(a.intersection(b).cloned().collect())
            }
        }
    }
}
