//! Environment variable secret store

use std::env;

use super::traits::SecretStore;

/// Secret store that reads from environment variables
///
/// For platforms that inject secrets as environment variables rather than a
/// `secrets.toml`. Keys are looked up verbatim (`PEXELS_API_KEY`), optionally
/// under a prefix (`MPT_PEXELS_API_KEY`). Empty values count as absent.
///
/// # Example
///
/// ```
/// use mpt_config::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::with_prefix("MPT_");
/// // store.get("PEXELS_API_KEY") reads MPT_PEXELS_API_KEY
/// assert_eq!(store.name(), "env");
/// ```
#[derive(Debug, Default, Clone)]
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    /// Create a store reading unprefixed variables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store reading `<prefix><KEY>` variables
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The environment variable name consulted for `key`
    pub fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        match env::var(self.var_name(key)) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}
