//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::traits::{SecretStore, SecretInfo};

/// A secret store that chains multiple stores together with fallback behavior
///
/// Reads try each available store in order and return the first match.
///
/// # Example
///
/// ```
/// use mpt_config::secrets::{SecretStore, ChainSecretStore, EnvSecretStore, MemorySecretStore};
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemorySecretStore::new());
/// let env = Arc::new(EnvSecretStore::new());
///
/// // Try memory first, then fall back to env
/// let chain = ChainSecretStore::new(vec![memory.clone(), env]);
/// memory.insert("VIDEO_SOURCE", "pexels");
/// assert_eq!(chain.get("VIDEO_SOURCE"), Some("pexels".to_string()));
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
}

impl ChainSecretStore {
    /// Create a new chain store. Stores are tried in order for reads.
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> Self {
        if stores.is_empty() {
            panic!("ChainSecretStore requires at least one store");
        }
        Self { stores }
    }

    /// Get the stores in this chain
    pub fn stores(&self) -> &[Arc<dyn SecretStore>] {
        &self.stores
    }

    /// Find which store has a key
    pub fn find_store(&self, key: &str) -> Option<&Arc<dyn SecretStore>> {
        self.stores
            .iter()
            .find(|store| store.is_available() && store.has(key))
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.stores
            .iter()
            .filter(|store| store.is_available())
            .find_map(|store| store.get(key))
    }

    fn get_info(&self, key: &str) -> SecretInfo {
        match self.find_store(key) {
            Some(store) => SecretInfo::new(true, store.name()),
            None => SecretInfo::not_found(),
        }
    }
}

// Arc<dyn SecretStore> doesn't implement Debug
impl std::fmt::Debug for ChainSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainSecretStore")
            .field("stores", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecretStore;

    struct Offline;

    impl SecretStore for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn is_available(&self) -> bool {
            false
        }

        fn get(&self, _key: &str) -> Option<String> {
            Some("should never be read".to_string())
        }
    }

    #[test]
    fn test_chain_store_name() {
        let store = ChainSecretStore::new(vec![Arc::new(MemorySecretStore::new())]);
        assert_eq!(store.name(), "chain");
    }

    #[test]
    fn test_chain_store_fallback() {
        let store1 = Arc::new(MemorySecretStore::new());
        let store2 = Arc::new(MemorySecretStore::new());
        store2.insert("key", "from_store2");

        let chain = ChainSecretStore::new(vec![store1, store2]);
        assert_eq!(chain.get("key"), Some("from_store2".to_string()));
    }

    #[test]
    fn test_chain_store_priority() {
        let store1 = Arc::new(MemorySecretStore::new());
        let store2 = Arc::new(MemorySecretStore::new());
        store1.insert("key", "from_store1");
        store2.insert("key", "from_store2");

        let chain = ChainSecretStore::new(vec![store1, store2]);
        assert_eq!(chain.get("key"), Some("from_store1".to_string()));
    }

    #[test]
    fn test_chain_store_skips_unavailable() {
        let memory = Arc::new(MemorySecretStore::new());
        let chain = ChainSecretStore::new(vec![Arc::new(Offline), memory.clone()]);

        assert!(chain.is_available());
        assert_eq!(chain.get("key"), None);

        memory.insert("key", "value");
        assert_eq!(chain.get("key"), Some("value".to_string()));
        assert_eq!(chain.find_store("key").map(|s| s.name()), Some("memory"));

        let offline_only = ChainSecretStore::new(vec![Arc::new(Offline)]);
        assert!(!offline_only.is_available());
    }

    #[test]
    fn test_chain_store_get_info() {
        let store1 = Arc::new(MemorySecretStore::new());
        let store2 = Arc::new(MemorySecretStore::new());
        store2.insert("key", "value");

        let chain = ChainSecretStore::new(vec![store1, store2]);

        let info = chain.get_info("key");
        assert!(info.available);
        assert_eq!(info.source, "memory");
        assert!(!chain.get_info("nonexistent").available);
    }

    #[test]
    #[should_panic(expected = "requires at least one store")]
    fn test_chain_store_empty_panics() {
        ChainSecretStore::new(vec![]);
    }
}
