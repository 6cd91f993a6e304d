//! Configuration errors

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::secrets::SecretStoreError;

/// Errors that can occur while resolving settings
///
/// Only the variants produced after every recovery step has been tried reach
/// the caller: a directory squatting on the config path and a missing file
/// with a template next to it are repaired, and a first parse failure is
/// retried with signature-aware UTF-8 decoding.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read (usually: absent and no template)
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not UTF-8, with or without a byte-order mark
    #[error("Config file {} is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// The config file is not valid TOML
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting cannot be turned into what its consumer needs, such as a
    /// `listen_host` that resolves to no address
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The hosted secret store exists but could not be opened
    #[error("Secret store error: {0}")]
    Secrets(#[from] SecretStoreError),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Process-wide settings were installed twice
    #[error("Settings are already initialized for this process")]
    AlreadyInitialized,

    /// Repairing the config path (directory removal, template copy) failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ConfigError {
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// True for failures to turn the config file into a TOML table
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ConfigError::Read { .. } | ConfigError::Decode { .. } | ConfigError::Parse { .. }
        )
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_include_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("/srv/mpt/config.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/srv/mpt/config.toml"));
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_invalid_value() {
        let err = ConfigError::invalid_value("listen_port", "expected an integer");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'listen_port': expected an integer"
        );
        assert!(!err.is_parse_failure());
    }
}
