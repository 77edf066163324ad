//! Keyhold demo - walks the vault operations against the in-memory backend
//!
//! Run with: cargo run --example demo

use std::sync::Arc;

use keyhold_core::{CredentialVault, MemoryStore, Result};

fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let vault = CredentialVault::with_service_name(Arc::new(MemoryStore::new()), "com.example.app");
    println!("backend: {}", vault.backend_name());
    println!("namespace: {}", vault.service_name());

    vault.store("apiToken", "s3cr3t")?;
    match vault.fetch("apiToken")? {
        Some(secret) => println!("apiToken = {}", secret.expose()),
        None => println!("apiToken is not set"),
    }

    vault.remove("apiToken")?;
    println!("after remove: {:?}", vault.fetch("apiToken")?);

    vault.store("k1", "a")?;
    vault.store("k2", "b")?;
    vault.remove_all()?;
    println!("after remove_all: k1 = {:?}", vault.fetch("k1")?);

    Ok(())
}
