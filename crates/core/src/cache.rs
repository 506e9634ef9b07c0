use std::collections::HashMap;

use serde_json::Value;

/// 单个顶层键的缓存槽位
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    /// No trustworthy value, must be recomputed on the next read
    #[default]
    Invalid,
    /// Validated value consistent with the current raw data and schema
    Valid(Value),
}

/// Validation cache with one explicit slot per top-level key
#[derive(Debug, Default)]
pub struct ValidationCache {
    slots: HashMap<String, Slot>,
}

impl ValidationCache {
    /// Create new validation cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the validated value if the slot is valid
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.slots.get(key) {
            Some(Slot::Valid(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Valid(_)))
    }

    /// Store a freshly validated value
    pub fn store(&mut self, key: &str, value: Value) {
        self.slots.insert(key.to_string(), Slot::Valid(value));
    }

    /// Flip the slot to invalid; returns whether a valid value was evicted
    pub fn invalidate(&mut self, key: &str) -> bool {
        match self.slots.get_mut(key) {
            Some(slot) => matches!(std::mem::take(slot), Slot::Valid(_)),
            None => false,
        }
    }
}
