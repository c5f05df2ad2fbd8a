pub mod json_backend;

use std::{collections::HashMap, sync::RwLock};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{LedgerError, Result};

pub use json_backend::JsonFileStore;

pub const EXPENSES_KEY: &str = "expenses";
pub const BUDGET_KEY: &str = "monthlyBudget";
pub const PERIOD_DAY_KEY: &str = "monthDay";
pub const QUICK_BUTTONS_KEY: &str = "quickButtons";

/// String key-value persistence the ledger writes through after each mutation.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads and decodes `key`. Unreadable or malformed values are logged and
/// reported as absent so callers fall back to their defaults.
pub fn read_entry<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored value; using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "stored value is malformed; using default");
            None
        }
    }
}

pub fn write_entry<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Volatile store backed by a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_entries_round_trip() {
        let store = MemoryStore::new();
        write_entry(&store, BUDGET_KEY, &1234.5).unwrap();
        assert_eq!(store.get(BUDGET_KEY).unwrap().as_deref(), Some("1234.5"));
        assert_eq!(read_entry::<f64>(&store, BUDGET_KEY), Some(1234.5));
    }

    #[test]
    fn malformed_values_read_as_absent() {
        let store = MemoryStore::new();
        store.set(PERIOD_DAY_KEY, "not json").unwrap();
        assert_eq!(read_entry::<u32>(&store, PERIOD_DAY_KEY), None);
        assert_eq!(read_entry::<u32>(&store, "missing"), None);
    }

    #[test]
    fn remove_drops_the_entry() {
        let store = MemoryStore::new();
        store.set(EXPENSES_KEY, "[]").unwrap();
        assert_eq!(store.len(), 1);
        store.remove(EXPENSES_KEY).unwrap();
        assert!(store.is_empty());
    }
}
