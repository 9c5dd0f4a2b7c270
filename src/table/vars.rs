//! VariableTable implementation
//!
//! HashMap-based table with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Name → value store for all live variables
pub struct VariableTable {
    vars: RwLock<HashMap<String, String>>,
}

impl VariableTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            vars: RwLock::new(HashMap::new()),
        }
    }

    /// Get a variable's current value (read lock, no side effects)
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.read().get(name).cloned()
    }

    /// Unconditional upsert; returns the prior value if the variable existed
    pub fn put(&self, name: String, value: String) -> Option<String> {
        self.vars.write().insert(name, value)
    }

    /// Unconditional delete; returns the removed value, `None` if absent
    pub fn remove(&self, name: &str) -> Option<String> {
        self.vars.write().remove(name)
    }

    /// Remove all variables
    pub fn clear(&self) {
        self.vars.write().clear();
    }

    /// Number of live variables
    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    /// Whether the table holds no variables
    pub fn is_empty(&self) -> bool {
        self.vars.read().is_empty()
    }
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}
