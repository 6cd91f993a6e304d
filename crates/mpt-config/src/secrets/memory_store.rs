//! In-memory secret store

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::SecretStore;

/// In-memory secret store for tests and embedding
///
/// Hosts that receive secrets through their own channel can pour them in
/// here and hand the store to the resolver.
///
/// # Example
///
/// ```
/// use mpt_config::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::new();
/// store.insert("PEXELS_API_KEY", "px-test");
/// assert_eq!(store.get("PEXELS_API_KEY"), Some("px-test".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial values
    pub fn with_secrets(initial: HashMap<String, String>) -> Self {
        Self {
            secrets: RwLock::new(initial),
        }
    }

    /// Insert or replace a secret
    pub fn insert(&self, key: &str, value: &str) {
        let mut secrets = self.secrets.write().unwrap_or_else(|e| e.into_inner());
        secrets.insert(key.to_string(), value.to_string());
    }

    /// Remove a secret, returning its previous value
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut secrets = self.secrets.write().unwrap_or_else(|e| e.into_inner());
        secrets.remove(key)
    }

    /// Clear all secrets from the store
    pub fn clear(&self) {
        let mut secrets = self.secrets.write().unwrap_or_else(|e| e.into_inner());
        secrets.clear();
    }

    /// Get the number of secrets in the store
    pub fn len(&self) -> usize {
        let secrets = self.secrets.read().unwrap_or_else(|e| e.into_inner());
        secrets.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        let secrets = self.secrets.read().unwrap_or_else(|e| e.into_inner());
        secrets.get(key).cloned()
    }
}

impl Clone for MemorySecretStore {
    fn clone(&self) -> Self {
        let secrets = self.secrets.read().unwrap_or_else(|e| e.into_inner());
        Self {
            secrets: RwLock::new(secrets.clone()),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySecretStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_secrets(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
