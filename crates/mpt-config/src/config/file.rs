//! `config.toml` on disk
//!
//! Before parsing, the file location is repaired: a directory squatting on
//! the path is removed, and a missing file is bootstrapped from
//! `config.example.toml`. Parsing tries plain UTF-8 first and then a
//! byte-order-mark-aware decode of the raw bytes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::Table;

use super::error::{ConfigError, ConfigResult};
use crate::logging::Logger;
use crate::{log_info, log_warn};

/// Config file name under the install root
pub const CONFIG_FILE: &str = "config.toml";

/// Template file name under the install root
pub const TEMPLATE_FILE: &str = "config.example.toml";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A config file together with the template used to create it
///
/// # Example
///
/// ```no_run
/// use mpt_config::config::ConfigFile;
/// use mpt_config::logging::NoOpLogger;
///
/// let file = ConfigFile::in_root("/opt/MoneyPrinterTurbo");
/// let table = file.load(&NoOpLogger).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
    template: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>, template: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template: template.into(),
        }
    }

    /// `<root>/config.toml` with `<root>/config.example.toml` as template
    pub fn in_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join(CONFIG_FILE), root.join(TEMPLATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Check if the config file exists as a regular file
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Repair the config path so it can be parsed
    ///
    /// A directory at the path is removed with its contents. A missing file
    /// is created from the template when one exists; without a template the
    /// path is left alone and parsing reports the problem.
    pub fn prepare(&self, logger: &dyn Logger) -> ConfigResult<()> {
        if self.path.is_dir() {
            fs::remove_dir_all(&self.path)?;
            log_info!(
                logger,
                "Removed directory at config path {}",
                self.path.display()
            );
        }

        if !self.path.is_file() && self.template.is_file() && self.copy_template()? {
            log_info!(
                logger,
                "Copied {} to {}",
                display_name(&self.template),
                display_name(&self.path)
            );
        }

        Ok(())
    }

    /// Prepare the path and parse the file into a TOML table
    ///
    /// A failed first attempt is logged as a warning and retried once from
    /// the raw bytes with any UTF-8 signature stripped. The retry's error is
    /// the one returned.
    pub fn load(&self, logger: &dyn Logger) -> ConfigResult<Table> {
        self.prepare(logger)?;

        log_info!(logger, "Loading config from file: {}", self.path.display());

        match self.parse_text() {
            Ok(table) => Ok(table),
            Err(e) => {
                log_warn!(logger, "Load config failed: {}, trying utf-8-sig", e);
                self.parse_bytes()
            }
        }
    }

    /// Copy the template next to the config path without clobbering
    ///
    /// The copy is written to a temporary file in the target directory and
    /// moved into place only if nothing exists there yet, so a concurrent
    /// reader never sees a half-written file. The copy takes the template's
    /// permissions. Returns `false` when another process created the file
    /// first.
    fn copy_template(&self) -> ConfigResult<bool> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        let mut template = fs::File::open(&self.template)?;
        io::copy(&mut template, staged.as_file_mut())?;
        staged.as_file().sync_all()?;
        staged
            .as_file()
            .set_permissions(template.metadata()?.permissions())?;

        match staged.persist_noclobber(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(ConfigError::Io(e.error)),
        }
    }

    fn parse_text(&self) -> ConfigResult<Table> {
        let content = fs::read_to_string(&self.path).map_err(|source| self.read_error(source))?;
        self.parse_str(&content)
    }

    fn parse_bytes(&self) -> ConfigResult<Table> {
        let bytes = fs::read(&self.path).map_err(|source| self.read_error(source))?;
        let content = decode_utf8_sig(bytes).map_err(|source| ConfigError::Decode {
            path: self.path.clone(),
            source,
        })?;
        self.parse_str(&content)
    }

    fn parse_str(&self, content: &str) -> ConfigResult<Table> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn read_error(&self, source: io::Error) -> ConfigError {
        ConfigError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

/// Decode UTF-8, dropping a leading byte-order mark if present
pub fn decode_utf8_sig(mut bytes: Vec<u8>) -> Result<String, std::string::FromUtf8Error> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    String::from_utf8(bytes)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
