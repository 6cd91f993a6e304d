//! Settings resolution from hosted secrets or `config.toml`
//!
//! Resolution order:
//! 1. Hosted secret store, if it holds `PEXELS_API_KEY`. The filesystem is
//!    not consulted at all on this path.
//! 2. `<install-root>/config.toml`, repaired and bootstrapped from
//!    `config.example.toml` as needed.
//!
//! Resolution is a single synchronous pass meant to run once at startup.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::hostname::system_hostname;
use crate::config::{
    ConfigFile, ConfigResult, Settings, SettingsSource, CONFIG_FILE, PEXELS_API_KEY, TEMPLATE_FILE,
};
use crate::log_info;
use crate::logging::{ConsoleLogger, SharedLogger};
use crate::secrets::{hosted_secret_store, SecretStore};

/// Environment variable overriding the install root
pub const INSTALL_ROOT_ENV: &str = "MPT_ROOT_DIR";

/// Directory holding `config.toml` and `config.example.toml`
///
/// In order: `MPT_ROOT_DIR` when set, the nearest directory above the
/// running executable that holds either file, and finally the workspace
/// root this crate was built in.
pub fn install_root() -> PathBuf {
    if let Some(root) = env::var_os(INSTALL_ROOT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(root);
    }
    if let Some(root) = env::current_exe().ok().as_deref().and_then(root_above) {
        return root;
    }
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Nearest ancestor of `path` holding `config.toml` or `config.example.toml`
fn root_above(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .skip(1)
        .find(|dir| dir.join(CONFIG_FILE).is_file() || dir.join(TEMPLATE_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Which secret store the resolver checks first
#[derive(Clone)]
enum SecretSource {
    /// `.streamlit/secrets.toml` under the root, then under the home dir
    Hosted,
    Custom(Arc<dyn SecretStore>),
    Disabled,
}

/// Resolves [`Settings`] for the process
///
/// # Example
///
/// ```no_run
/// use mpt_config::ConfigResolver;
///
/// let settings = ConfigResolver::new().resolve()?;
/// println!("listening on {}:{}", settings.listen_host(), settings.listen_port());
/// # Ok::<(), mpt_config::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    root: PathBuf,
    secrets: SecretSource,
    logger: SharedLogger,
    hostname: Option<String>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver for the install root with the hosted secret store and a
    /// console logger
    pub fn new() -> Self {
        Self {
            root: install_root(),
            secrets: SecretSource::Hosted,
            logger: Arc::new(ConsoleLogger::new()),
            hostname: None,
        }
    }

    /// Resolve against a different install root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Check `store` instead of the hosted secrets files
    pub fn with_secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.secrets = SecretSource::Custom(store);
        self
    }

    /// Always resolve from `config.toml`
    pub fn without_secret_store(mut self) -> Self {
        self.secrets = SecretSource::Disabled;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Report `hostname` instead of asking the operating system
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> ConfigFile {
        ConfigFile::in_root(&self.root)
    }

    /// Produce the process settings
    ///
    /// Recoverable conditions (no secrets, directory at the config path,
    /// missing file with a template, first parse failure) are handled here
    /// and logged. A file that cannot be parsed even after the retry is
    /// returned as an error and should halt startup.
    pub fn resolve(&self) -> ConfigResult<Settings> {
        let hostname = self.hostname.clone().unwrap_or_else(system_hostname);

        let settings = match self.secret_store()? {
            Some(store) if store.is_available() && store.has(PEXELS_API_KEY) => {
                log_info!(self.logger, "Loading config from hosted secrets ({})", store.name());
                Settings::from_secrets(store.as_ref(), hostname)
            }
            _ => {
                let file = self.config_file();
                let table = file.load(self.logger.as_ref())?;
                let source = SettingsSource::File(file.path().to_path_buf());
                Settings::from_table(table, hostname, source, self.logger.as_ref())
            }
        };

        log_info!(
            self.logger,
            "{} v{}",
            settings.project_name(),
            settings.project_version()
        );
        Ok(settings)
    }

    fn secret_store(&self) -> ConfigResult<Option<Arc<dyn SecretStore>>> {
        Ok(match &self.secrets {
            SecretSource::Hosted => {
                let store: Arc<dyn SecretStore> = Arc::new(hosted_secret_store(&self.root)?);
                Some(store)
            }
            SecretSource::Custom(store) => Some(Arc::clone(store)),
            SecretSource::Disabled => None,
        })
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secrets = match &self.secrets {
            SecretSource::Hosted => "hosted".to_string(),
            SecretSource::Custom(store) => store.name().to_string(),
            SecretSource::Disabled => "disabled".to_string(),
        };
        f.debug_struct("ConfigResolver")
            .field("root", &self.root)
            .field("secrets", &secrets)
            .field("hostname", &self.hostname)
            .finish()
    }
}
