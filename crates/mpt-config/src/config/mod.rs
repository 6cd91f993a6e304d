//! Settings data model and the on-disk config file
//!
//! - `Settings`: the resolved, immutable configuration tree
//! - `ConfigFile`: `config.toml` bootstrap and decoding
//! - `ToolEnvironment`: media tool binaries for consumers to apply

mod error;
mod file;
mod settings;
mod tools;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, decode_utf8_sig, CONFIG_FILE, TEMPLATE_FILE};
pub use settings::*;
pub use tools::{ToolEnvironment, IMAGEMAGICK_BINARY, IMAGEIO_FFMPEG_EXE};
