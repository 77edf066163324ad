//! OS keychain storage backend
//!
//! Uses the system credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager (DPAPI)
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::SecureStore;
use crate::error::{Result, VaultError};

/// Reserved key holding the per-service index of stored key names.
///
/// The keychain exposes no enumeration primitive, so bulk removal needs a
/// record of which keys exist under a service. The record lives inside the
/// keychain itself as a JSON document under this key; the backend keeps no
/// in-process copy.
pub(crate) const INDEX_KEY: &str = "__keyhold.index__";

/// Per-service record of stored key names, persisted under [`INDEX_KEY`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct KeyIndex {
    keys: Vec<String>,
}

/// OS keychain storage backend
pub struct KeychainStore {
    /// Whether the keychain answered an availability probe
    available: bool,
}

impl KeychainStore {
    /// Create a new keychain store, probing availability once
    pub fn new() -> Self {
        let available = Self::test_availability();

        if available {
            debug!("keychain storage is available");
        } else {
            warn!("keychain storage is not available on this host");
        }

        Self { available }
    }

    /// Test if the keychain is available
    fn test_availability() -> bool {
        let test_entry = Entry::new("keyhold", "__test_availability__");
        match test_entry {
            Ok(entry) => {
                // Try to set and delete a test value
                let result = entry.set_password("test");
                if result.is_ok() {
                    let _ = entry.delete_password();
                    true
                } else {
                    false
                }
            }
            Err(_) => false,
        }
    }

    /// Check if the keychain is available
    pub fn is_available(&self) -> bool {
        self.available
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(VaultError::Storage("keychain not available".to_string()))
        }
    }

    fn entry(&self, service: &str, key: &str) -> Result<Entry> {
        Entry::new(service, key).map_err(VaultError::from)
    }

    /// Read the key index for a service, empty when none has been written yet
    fn read_index(&self, service: &str) -> Result<KeyIndex> {
        let entry = self.entry(service, INDEX_KEY)?;
        match entry.get_password() {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(keyring::Error::NoEntry) => Ok(KeyIndex::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the key index back, removing the index entry when it is empty
    fn write_index(&self, service: &str, index: &KeyIndex) -> Result<()> {
        let entry = self.entry(service, INDEX_KEY)?;
        if index.keys.is_empty() {
            match entry.delete_password() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(e.into()),
            }
        } else {
            let raw = serde_json::to_string(index)?;
            entry.set_password(&raw).map_err(VaultError::from)
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureStore for KeychainStore {
    fn store(&self, service: &str, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;

        self.entry(service, key)?.set_password(value)?;

        let mut index = self.read_index(service)?;
        if !index.keys.iter().any(|k| k == key) {
            index.keys.push(key.to_string());
            self.write_index(service, &index)?;
        }

        debug!(service, key, "stored entry in keychain");
        Ok(())
    }

    fn retrieve(&self, service: &str, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;

        match self.entry(service, key)?.get_password() {
            Ok(value) => {
                debug!(service, key, "retrieved entry from keychain");
                Ok(Some(value))
            }
            Err(keyring::Error::NoEntry) => {
                debug!(service, key, "entry not found in keychain");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, service: &str, key: &str) -> Result<()> {
        self.ensure_available()?;

        match self.entry(service, key)?.delete_password() {
            Ok(()) => debug!(service, key, "deleted entry from keychain"),
            // Entry doesn't exist, that's fine
            Err(keyring::Error::NoEntry) => {}
            Err(e) => return Err(e.into()),
        }

        let mut index = self.read_index(service)?;
        if index.keys.iter().any(|k| k == key) {
            index.keys.retain(|k| k != key);
            self.write_index(service, &index)?;
        }

        Ok(())
    }

    fn delete_all(&self, service: &str) -> Result<()> {
        self.ensure_available()?;

        let index = self.read_index(service)?;
        for key in &index.keys {
            match self.entry(service, key)?.delete_password() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.write_index(service, &KeyIndex::default())?;

        debug!(
            service,
            count = index.keys.len(),
            "cleared service in keychain"
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        #[cfg(target_os = "macos")]
        return "macOS Keychain";

        #[cfg(target_os = "windows")]
        return "Windows Credential Manager";

        #[cfg(target_os = "linux")]
        return "Linux Secret Service";

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        return "System Keychain";
    }
}
