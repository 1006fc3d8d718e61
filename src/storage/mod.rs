//! Key/value persistence used by the tracker.
//!
//! The three records (`settings`, `entries`, `timerState`) are stored as
//! opaque JSON values. The backend is picked once, in [`open_store`].

use crate::errors::AppResult;
use serde_json::Value;
use std::collections::HashMap;

pub const KEY_SETTINGS: &str = "settings";
pub const KEY_ENTRIES: &str = "entries";
pub const KEY_TIMER_STATE: &str = "timerState";

pub type StoreResult<T> = AppResult<T>;

pub trait KeyValueStore {
    /// Reads `keys`. Every requested key is present in the result, `None` when unset.
    fn get(&self, keys: &[&str]) -> StoreResult<HashMap<String, Option<Value>>>;

    /// Writes all pairs; an existing value is replaced.
    fn set(&mut self, items: Vec<(String, Value)>) -> StoreResult<()>;

    /// Records an audit line. Backends without an audit trail ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, keys: &[&str]) -> StoreResult<HashMap<String, Option<Value>>> {
        (**self).get(keys)
    }

    fn set(&mut self, items: Vec<(String, Value)>) -> StoreResult<()> {
        (**self).set(items)
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> StoreResult<()> {
        (**self).audit(operation, target, message)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, handy for restoring hand-written records.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> StoreResult<HashMap<String, Option<Value>>> {
        Ok(keys
            .iter()
            .map(|k| (k.to_string(), self.values.get(*k).cloned()))
            .collect())
    }

    fn set(&mut self, items: Vec<(String, Value)>) -> StoreResult<()> {
        self.values.extend(items);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Opens the SQLite database at `path`. When that fails the tracker still
/// works, on a memory store, and the failure is only logged.
pub fn open_store(path: &str) -> Box<dyn KeyValueStore> {
    match crate::db::SqliteStore::open(path) {
        Ok(store) => {
            tracing::debug!(path, "using sqlite store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "sqlite store unavailable, falling back to memory");
            Box::new(MemoryStore::new())
        }
    }
}
