//! Storage backends for credential persistence
//!
//! This module provides two storage backends:
//! 1. OS keychain (the platform credential store)
//! 2. In-memory map (tests, hosts without a keychain)

mod keychain;
mod memory;
mod traits;

pub(crate) use keychain::INDEX_KEY;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;
pub use traits::SecureStore;
