//! Error types for keyhold-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
///
/// An absent key is not an error: [`crate::CredentialVault::fetch`] reports it
/// as `Ok(None)`. Everything here is a genuine failure surfaced to the caller.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("credential store error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
