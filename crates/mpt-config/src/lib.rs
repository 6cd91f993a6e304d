//! MoneyPrinterTurbo settings
//!
//! Resolves the process-wide configuration of the video generator once at
//! startup: from a hosted secret store when one carries a Pexels key,
//! otherwise from `config.toml` under the install root (bootstrapped from
//! `config.example.toml` on first run).
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mpt_config::{ConfigResolver, ConsoleLogger};
//!
//! let settings = ConfigResolver::new()
//!     .with_logger(Arc::new(ConsoleLogger::new()))
//!     .resolve()?;
//!
//! let whisper = settings.whisper();
//! println!("whisper {} on {}", whisper.model_size, whisper.device);
//!
//! // media consumers get tool paths explicitly
//! let mut ffmpeg = std::process::Command::new("ffmpeg");
//! settings.tool_environment().apply_to(&mut ffmpeg);
//! # Ok::<(), mpt_config::ConfigError>(())
//! ```

pub mod logging;
pub mod secrets;
pub mod config;
pub mod resolver;

pub use config::{
    ConfigError, ConfigResult, ConfigFile, Section, Settings, SettingsSource,
    ToolEnvironment, WhisperSettings,
};

pub use secrets::{
    SecretStore, SecretInfo, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore, ChainSecretStore, TomlSecretStore,
    hosted_secret_store, hosted_secret_paths,
};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, SharedLogger};

pub use resolver::{ConfigResolver, install_root, init_with, settings, try_settings};
