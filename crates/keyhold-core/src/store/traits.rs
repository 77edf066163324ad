//! Storage trait definitions

use crate::error::Result;

/// Trait for secure storage backends
///
/// Every entry is scoped by a `(service, key)` pair; the service string is
/// passed on each call so a single backend can serve vaults with different
/// namespaces. Operations are synchronous: each one is a single blocking
/// request against the underlying store, with no retry or batching.
pub trait SecureStore: Send + Sync {
    /// Store a value under `(service, key)`, overwriting any existing entry
    fn store(&self, service: &str, key: &str, value: &str) -> Result<()>;

    /// Retrieve the value for `(service, key)`
    ///
    /// Returns `Ok(None)` when no entry exists. Absence is never reported
    /// through the error channel.
    fn retrieve(&self, service: &str, key: &str) -> Result<Option<String>>;

    /// Delete the entry for `(service, key)`
    ///
    /// Deleting an absent entry is a no-op success.
    fn delete(&self, service: &str, key: &str) -> Result<()>;

    /// Delete every entry under `service`, leaving other services untouched
    fn delete_all(&self, service: &str) -> Result<()>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
