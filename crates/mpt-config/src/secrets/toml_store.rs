//! Hosted `secrets.toml` secret store
//!
//! Hosted dashboards inject credentials through a flat TOML file:
//! `.streamlit/secrets.toml` in the directory the app was launched from,
//! with a user-level `~/.streamlit/secrets.toml` underneath it.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::chain_store::ChainSecretStore;
use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Directory holding the hosted secrets file
pub const SECRETS_DIR: &str = ".streamlit";

/// Hosted secrets file name
pub const SECRETS_FILE: &str = "secrets.toml";

/// Secret store backed by a flat TOML file
///
/// Top-level scalar entries become secrets: strings as-is, numbers and
/// booleans in their TOML spelling. Tables and arrays are skipped. A missing
/// file yields a store that reports itself unavailable.
#[derive(Debug, Clone)]
pub struct TomlSecretStore {
    path: PathBuf,
    available: bool,
    secrets: HashMap<String, String>,
}

impl TomlSecretStore {
    /// Open the secrets file at `path`
    ///
    /// Returns an unavailable, empty store when there is no file. Read and
    /// parse failures are errors: a hosted deployment with a broken secrets
    /// file should not silently fall back to disk config.
    pub fn open(path: impl Into<PathBuf>) -> SecretStoreResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Ok(Self {
                path,
                available: false,
                secrets: HashMap::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(path, &content)
    }

    /// Build a store from TOML text; `path` is only used for reporting
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> SecretStoreResult<Self> {
        let path = path.into();
        let table: toml::Table = toml::from_str(content).map_err(|source| SecretStoreError::Parse {
            path: path.clone(),
            source,
        })?;

        let secrets = table
            .into_iter()
            .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key, v)))
            .collect();

        Ok(Self {
            path,
            available: true,
            secrets,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of scalar secrets loaded
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

fn scalar_to_string(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

impl SecretStore for TomlSecretStore {
    fn name(&self) -> &str {
        "secrets.toml"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.get(key).cloned()
    }
}

/// The hosted secret store for an installation rooted at `root`
///
/// Files are checked in the order of [`hosted_secret_paths`].
pub fn hosted_secret_store(root: impl AsRef<Path>) -> SecretStoreResult<ChainSecretStore> {
    let stores = hosted_secret_paths(root.as_ref())
        .into_iter()
        .map(|path| {
            TomlSecretStore::open(path).map(|store| Arc::new(store) as Arc<dyn SecretStore>)
        })
        .collect::<SecretStoreResult<Vec<_>>>()?;

    Ok(ChainSecretStore::new(stores))
}

/// Candidate `secrets.toml` locations, highest priority first
///
/// The working directory comes first since that is where the dashboard
/// looks for it, then the install root, then the home directory.
pub fn hosted_secret_paths(root: &Path) -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        dirs_to_check.push(cwd);
    }
    dirs_to_check.push(root.to_path_buf());
    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home);
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_check {
        let path = dir.join(SECRETS_DIR).join(SECRETS_FILE);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}
