#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// In-process store for tests and ephemeral hosts.
///
/// `read_only` models a private browsing session: reads succeed, every
/// mutation fails with `WriteDenied`. This is what Firefox-family engines do
/// to local storage in private windows.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            read_only: false,
        }
    }

    /// A store that refuses all writes, preloaded with `seed` entries.
    pub fn read_only(seed: &[(&str, &str)]) -> Self {
        let entries = seed
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: RwLock::new(entries),
            read_only: true,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteDenied);
        }
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteDenied);
        }
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_value() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_set_overwrites_prior_value() {
        let store = MemoryStore::new();
        store.set("k", "old").unwrap();
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_read_only_store_denies_writes() {
        let store = MemoryStore::read_only(&[("k", "v")]);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(matches!(
            store.set("other", "x"),
            Err(StorageError::WriteDenied)
        ));
        assert!(matches!(store.remove("k"), Err(StorageError::WriteDenied)));
    }
}
