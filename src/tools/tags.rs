//! Free-form persisted tag data attached to item instances
//!
//! Hosts store tools as opaque key-value blobs; everything the engine knows
//! about a tool instance (damage, broken flag, modifier list, modifier
//! charge) round-trips through here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A free-form key-value tag blob for one item instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagData {
    entries: Map<String, Value>,
}

impl TagData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Integer accessor; absent or non-numeric keys read as 0
    pub fn get_int(&self, key: &str) -> i64 {
        self.entries.get(key).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Boolean accessor; absent or non-boolean keys read as false
    pub fn get_bool(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.put(key, Value::from(value));
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.put(key, Value::from(value));
    }

    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key, Value::from(value.into()));
    }
}
