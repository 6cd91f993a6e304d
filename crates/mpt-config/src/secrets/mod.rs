//! Secret storage abstractions and implementations
//!
//! Hosted deployments inject credentials instead of shipping a `config.toml`.
//! This module provides:
//! - `SecretStore` trait, the read-only view the resolver checks first
//! - `TomlSecretStore`: a hosted `secrets.toml` file
//! - `EnvSecretStore`: secrets injected as environment variables
//! - `MemorySecretStore`: in-memory, for tests and embedding
//! - `ChainSecretStore`: priority fallback over several stores

mod traits;
mod env_store;
mod memory_store;
mod chain_store;
mod toml_store;

pub use traits::{SecretStore, SecretInfo, SecretStoreError, SecretStoreResult};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
pub use chain_store::ChainSecretStore;
pub use toml_store::{
    TomlSecretStore, hosted_secret_store, hosted_secret_paths, SECRETS_DIR, SECRETS_FILE,
};
