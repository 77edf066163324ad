//! Credential vault facade

use std::sync::{Arc, OnceLock, RwLock};

use tracing::debug;

use crate::error::{Result, VaultError};
use crate::secret::Secret;
use crate::store::{KeychainStore, SecureStore, INDEX_KEY};

/// Service name used when the executable name cannot be determined
const FALLBACK_SERVICE_NAME: &str = "keyhold";

/// Namespaced facade over a secure storage backend
///
/// Every operation is scoped by the vault's current service name, read at
/// call time. The service name is shared and mutable: with concurrent
/// writers, subsequent reads observe the last write, with no atomicity
/// across operations. The vault keeps no copy of entry data; all persistence
/// lives in the backend.
pub struct CredentialVault {
    /// Storage backend
    store: Arc<dyn SecureStore>,
    /// Namespace scoping all operations
    service_name: RwLock<String>,
}

impl CredentialVault {
    /// Create a vault over the given backend
    ///
    /// The service name defaults to the running executable's file stem, the
    /// closest analogue to the embedding application's identifier.
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self::with_service_name(store, default_service_name())
    }

    /// Create a vault with an explicit service name
    pub fn with_service_name(store: Arc<dyn SecureStore>, service_name: impl Into<String>) -> Self {
        Self {
            store,
            service_name: RwLock::new(service_name.into()),
        }
    }

    /// Process-wide vault over the OS keychain, created on first access
    pub fn shared() -> &'static CredentialVault {
        static SHARED: OnceLock<CredentialVault> = OnceLock::new();
        SHARED.get_or_init(|| CredentialVault::new(Arc::new(KeychainStore::new())))
    }

    /// Get the current service name
    pub fn service_name(&self) -> String {
        self.service_name
            .read()
            .map(|name| name.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Set the service name scoping all subsequent operations
    pub fn set_service_name(&self, name: impl Into<String>) {
        let name = name.into();
        match self.service_name.write() {
            Ok(mut guard) => *guard = name,
            Err(e) => *e.into_inner() = name,
        }
    }

    /// Get the backend's human-readable name
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Store `value` under `key` in the current namespace
    ///
    /// Upserts: an existing entry for `key` is overwritten, never duplicated.
    /// The value may be empty; the key may not.
    pub fn store(&self, key: &str, value: &str) -> Result<()> {
        let service = self.service_name();
        validate_key(key)?;
        self.store.store(&service, key, value)?;
        debug!(service = %service, key, "stored credential");
        Ok(())
    }

    /// Fetch the value stored under `key` in the current namespace
    ///
    /// Returns `Ok(None)` when no entry exists; absence is a distinct outcome
    /// from failure. Read-only.
    pub fn fetch(&self, key: &str) -> Result<Option<Secret>> {
        let service = self.service_name();
        validate_key(key)?;
        Ok(self.store.retrieve(&service, key)?.map(Secret::new))
    }

    /// Remove the entry under `key` in the current namespace
    ///
    /// Removing an absent key is a no-op success.
    pub fn remove(&self, key: &str) -> Result<()> {
        let service = self.service_name();
        validate_key(key)?;
        self.store.delete(&service, key)?;
        debug!(service = %service, key, "removed credential");
        Ok(())
    }

    /// Remove every entry in the current namespace
    ///
    /// Entries under other service names in the same backend are unaffected.
    pub fn remove_all(&self) -> Result<()> {
        let service = self.service_name();
        self.store.delete_all(&service)?;
        debug!(service = %service, "removed all credentials in namespace");
        Ok(())
    }
}

/// Reject keys the backend cannot accept before contacting it
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(VaultError::InvalidKey("key must not be empty".to_string()));
    }
    if key == INDEX_KEY {
        return Err(VaultError::InvalidKey(format!("key '{key}' is reserved")));
    }
    Ok(())
}

fn default_service_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| FALLBACK_SERVICE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_vault() -> CredentialVault {
        CredentialVault::with_service_name(Arc::new(MemoryStore::new()), "com.example.app")
    }

    #[test]
    fn test_round_trip() {
        let vault = test_vault();

        vault.store("apiToken", "s3cr3t").unwrap();
        let fetched = vault.fetch("apiToken").unwrap().unwrap();
        assert_eq!(fetched.expose(), "s3cr3t");
    }

    #[test]
    fn test_fetch_absent_is_none_not_error() {
        let vault = test_vault();
        assert!(vault.fetch("never-stored").unwrap().is_none());
    }

    #[test]
    fn test_empty_value_round_trips() {
        let vault = test_vault();

        vault.store("blank", "").unwrap();
        let fetched = vault.fetch("blank").unwrap().unwrap();
        assert_eq!(fetched.expose(), "");
    }

    #[test]
    fn test_store_overwrites() {
        let vault = test_vault();

        vault.store("token", "old").unwrap();
        vault.store("token", "new").unwrap();

        let fetched = vault.fetch("token").unwrap().unwrap();
        assert_eq!(fetched.expose(), "new");
    }

    #[test]
    fn test_remove_then_fetch_absent() {
        let vault = test_vault();

        vault.store("apiToken", "s3cr3t").unwrap();
        vault.remove("apiToken").unwrap();
        assert!(vault.fetch("apiToken").unwrap().is_none());
    }

    #[test]
    fn test_remove_never_stored_key_succeeds() {
        let vault = test_vault();
        vault.remove("never-stored").unwrap();
    }

    #[test]
    fn test_remove_all_clears_namespace() {
        let vault = test_vault();

        vault.store("k1", "a").unwrap();
        vault.store("k2", "b").unwrap();
        vault.remove_all().unwrap();

        assert!(vault.fetch("k1").unwrap().is_none());
        assert!(vault.fetch("k2").unwrap().is_none());
    }

    #[test]
    fn test_remove_all_leaves_other_namespaces() {
        let store = Arc::new(MemoryStore::new());
        let vault = CredentialVault::with_service_name(store.clone(), "com.example.app");
        let other = CredentialVault::with_service_name(store, "com.example.other");

        vault.store("k1", "mine").unwrap();
        other.store("k1", "theirs").unwrap();

        vault.remove_all().unwrap();

        assert!(vault.fetch("k1").unwrap().is_none());
        let kept = other.fetch("k1").unwrap().unwrap();
        assert_eq!(kept.expose(), "theirs");
    }

    #[test]
    fn test_namespace_isolation_on_switch() {
        let vault = test_vault();

        vault.store("apiToken", "s3cr3t").unwrap();
        vault.set_service_name("com.example.second");
        assert!(vault.fetch("apiToken").unwrap().is_none());

        // Switching back makes the original entry visible again
        vault.set_service_name("com.example.app");
        let fetched = vault.fetch("apiToken").unwrap().unwrap();
        assert_eq!(fetched.expose(), "s3cr3t");
    }

    #[test]
    fn test_empty_key_rejected() {
        let vault = test_vault();

        assert!(matches!(
            vault.store("", "v"),
            Err(VaultError::InvalidKey(_))
        ));
        assert!(matches!(vault.fetch(""), Err(VaultError::InvalidKey(_))));
        assert!(matches!(vault.remove(""), Err(VaultError::InvalidKey(_))));
    }

    #[test]
    fn test_reserved_key_rejected() {
        let vault = test_vault();
        assert!(matches!(
            vault.store(INDEX_KEY, "v"),
            Err(VaultError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_default_service_name_is_nonempty() {
        let vault = CredentialVault::new(Arc::new(MemoryStore::new()));
        assert!(!vault.service_name().is_empty());
    }

    #[test]
    fn test_full_scenario() {
        let vault = test_vault();

        vault.store("apiToken", "s3cr3t").unwrap();
        let fetched = vault.fetch("apiToken").unwrap().unwrap();
        assert_eq!(fetched.expose(), "s3cr3t");

        vault.remove("apiToken").unwrap();
        assert!(vault.fetch("apiToken").unwrap().is_none());
    }
}
