//! Key-value persistence port.
//!
//! State machines (energy, daily counters, settings, reminders) never talk
//! to SQLite directly; they go through this port so tests and embedders can
//! substitute a store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{CoreError, Result};

/// An abstract map of string keys to string values.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>>;
    fn kv_set(&self, key: &str, value: &str) -> Result<()>;
    fn kv_remove(&self, key: &str) -> Result<()>;
}

/// In-memory store, used by tests and SQLite-free embedding.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| CoreError::Custom("memory store lock poisoned".to_string()))
    }
}

impl KvStore for MemoryKv {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn kv_remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_kv_round_trip() {
        let kv = MemoryKv::new();
        assert!(kv.kv_get("missing").unwrap().is_none());
        kv.kv_set("key", "value").unwrap();
        assert_eq!(kv.kv_get("key").unwrap().as_deref(), Some("value"));
        kv.kv_remove("key").unwrap();
        assert!(kv.kv_get("key").unwrap().is_none());
    }
}
