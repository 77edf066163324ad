//! In-memory storage backend
//!
//! Holds entries in a process-local map. Nothing is persisted or encrypted,
//! so this backend is for tests and for hosts without a usable keychain.

use std::collections::HashMap;
use std::sync::RwLock;

use super::SecureStore;
use crate::error::{Result, VaultError};

type EntryMap = HashMap<(String, String), String>;

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<EntryMap>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, EntryMap>> {
        self.entries
            .read()
            .map_err(|_| VaultError::Storage("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, EntryMap>> {
        self.entries
            .write()
            .map_err(|_| VaultError::Storage("memory store lock poisoned".to_string()))
    }
}

impl SecureStore for MemoryStore {
    fn store(&self, service: &str, key: &str, value: &str) -> Result<()> {
        let mut entries = self.write()?;
        entries.insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn retrieve(&self, service: &str, key: &str) -> Result<Option<String>> {
        let entries = self.read()?;
        Ok(entries
            .get(&(service.to_string(), key.to_string()))
            .cloned())
    }

    fn delete(&self, service: &str, key: &str) -> Result<()> {
        let mut entries = self.write()?;
        entries.remove(&(service.to_string(), key.to_string()));
        Ok(())
    }

    fn delete_all(&self, service: &str) -> Result<()> {
        let mut entries = self.write()?;
        entries.retain(|(s, _), _| s != service);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "In-Memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_retrieve() {
        let store = MemoryStore::new();
        store.store("svc", "k", "v").unwrap();
        assert_eq!(store.retrieve("svc", "k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_retrieve_absent() {
        let store = MemoryStore::new();
        assert!(store.retrieve("svc", "missing").unwrap().is_none());
    }

    #[test]
    fn test_overwrite() {
        let store = MemoryStore::new();
        store.store("svc", "k", "old").unwrap();
        store.store("svc", "k", "new").unwrap();
        assert_eq!(store.retrieve("svc", "k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.delete("svc", "never-stored").unwrap();
        store.store("svc", "k", "v").unwrap();
        store.delete("svc", "k").unwrap();
        store.delete("svc", "k").unwrap();
        assert!(store.retrieve("svc", "k").unwrap().is_none());
    }

    #[test]
    fn test_delete_all_scoped_to_service() {
        let store = MemoryStore::new();
        store.store("svc-a", "k1", "1").unwrap();
        store.store("svc-a", "k2", "2").unwrap();
        store.store("svc-b", "k1", "3").unwrap();

        store.delete_all("svc-a").unwrap();

        assert!(store.retrieve("svc-a", "k1").unwrap().is_none());
        assert!(store.retrieve("svc-a", "k2").unwrap().is_none());
        assert_eq!(store.retrieve("svc-b", "k1").unwrap().as_deref(), Some("3"));
    }
}
