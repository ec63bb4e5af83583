//! Task - a one-shot quota on the shared store

use crate::items::{Buffer, Item};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub target: Buffer,
    #[serde(default)]
    pub completed: bool,
}

/// Progress on one required item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub item: Item,
    pub have: u64,
    pub need: u64,
}

impl Requirement {
    pub fn is_met(&self) -> bool {
        self.have >= self.need
    }
}

impl Task {
    pub fn new(target: Buffer) -> Self {
        Self {
            target,
            completed: false,
        }
    }

    /// Check the quota against `store`. Returns true exactly once, on the
    /// call that first finds every target quantity met.
    pub fn update(&mut self, store: &Buffer) -> bool {
        if self.completed {
            return false;
        }
        if store.contains_all(&self.target) {
            self.completed = true;
            return true;
        }
        false
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Per-item progress, in item order
    pub fn progress(&self, store: &Buffer) -> Vec<Requirement> {
        self.target
            .iter()
            .map(|(item, need)| Requirement {
                item: item.clone(),
                have: store.get(item).min(need),
                need,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{IRON, IRON_ORE};

    #[test]
    fn test_signal_fires_once() {
        let mut task = Task::new([(IRON_ORE, 10)].into_iter().collect());
        let mut store = Buffer::new();

        store.set(IRON_ORE, 9);
        assert!(!task.update(&store));
        store.set(IRON_ORE, 10);
        assert!(task.update(&store));
        assert!(!task.update(&store));

        store.set(IRON_ORE, 0);
        assert!(!task.update(&store));
        assert!(task.is_completed());
    }

    #[test]
    fn test_progress_reports_each_item() {
        let task = Task::new([(IRON_ORE, 10), (IRON, 2)].into_iter().collect());
        let store: Buffer = [(IRON_ORE, 4), (IRON, 5)].into_iter().collect();

        let progress = task.progress(&store);
        assert_eq!(progress.len(), 2);
        let ore = progress.iter().find(|r| r.item == IRON_ORE).unwrap();
        assert_eq!((ore.have, ore.need), (4, 10));
        assert!(!ore.is_met());
        let iron = progress.iter().find(|r| r.item == IRON).unwrap();
        assert_eq!((iron.have, iron.need), (2, 2));
        assert!(iron.is_met());
    }

    #[test]
    fn test_empty_target_completes_immediately() {
        let mut task = Task::new(Buffer::new());
        assert!(task.update(&Buffer::new()));
    }
}
