use crate::economy::upgrade::Efficiency;
use crate::items::Buffer;
use serde::{Deserialize, Serialize};

/// Per-game economic state reached by buildings through the accessor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub efficiency: Efficiency,
    /// Everything ever delivered to a task center
    pub store: Buffer,
    /// Currency earned since the last tick settled with the profile
    pub value: i64,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a delivery into the store and credit its worth. Returns the
    /// amount credited.
    pub fn deposit(&mut self, delivery: Buffer) -> i64 {
        let worth = delivery.total_value();
        self.store.absorb(delivery);
        self.value = self.value.saturating_add(worth);
        worth
    }

    /// Hand over the pending value and reset it
    pub fn take_value(&mut self) -> i64 {
        std::mem::take(&mut self.value)
    }
}
