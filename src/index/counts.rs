//! ValueIndex implementation
//!
//! HashMap-based counter map with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Value → count of variables currently holding it
///
/// Invariant: every stored count is ≥ 1. `decrement` deletes the entry when
/// the count would reach 0.
pub struct ValueIndex {
    counts: RwLock<HashMap<String, u64>>,
}

impl ValueIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            counts: RwLock::new(HashMap::new()),
        }
    }

    /// Count one more variable holding `value`
    pub fn increment(&self, value: &str) {
        let mut counts = self.counts.write();
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    /// Count one fewer variable holding `value`
    ///
    /// Deletes the entry when its count reaches 0. Callers only decrement
    /// values they previously incremented; an untracked value is still
    /// tolerated as a logged no-op rather than a panic.
    pub fn decrement(&self, value: &str) {
        let mut counts = self.counts.write();
        match counts.get(value).copied() {
            Some(count) if count > 1 => {
                counts.insert(value.to_string(), count - 1);
            }
            Some(_) => {
                counts.remove(value);
            }
            None => {
                tracing::warn!("decrement on untracked value {:?}, ignoring", value);
            }
        }
    }

    /// How many variables currently hold `value` (O(1) point lookup)
    pub fn query(&self, value: &str) -> u64 {
        self.counts.read().get(value).copied().unwrap_or(0)
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.counts.write().clear();
    }

    /// Number of distinct values currently held by at least one variable
    pub fn distinct_values(&self) -> usize {
        self.counts.read().len()
    }
}

impl Default for ValueIndex {
    fn default() -> Self {
        Self::new()
    }
}
