//! # keyhold-core
//!
//! Namespaced string credentials backed by the platform credential store:
//! - a `CredentialVault` facade with store/fetch/remove/remove-all operations
//! - OS keychain backend with an in-memory alternative for tests
//! - zeroize-on-drop wrapper for fetched values
//!
//! The vault is a pass-through: encryption, access control, and persistence
//! are owned by the backend's underlying store. Fetching an absent key is
//! `Ok(None)`, distinct from failure; all failures surface to the caller
//! through `Result`, never retried or swallowed.

pub mod error;
pub mod secret;
pub mod store;
mod vault;

pub use error::{Result, VaultError};
pub use secret::Secret;
pub use store::{KeychainStore, MemoryStore, SecureStore};
pub use vault::CredentialVault;
