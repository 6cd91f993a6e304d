//! Settings resolution
//!
//! Hosted secrets first, then `config.toml` under the install root.

mod config_resolver;
mod global;
mod hostname;

pub use config_resolver::{ConfigResolver, install_root, INSTALL_ROOT_ENV};
pub use global::{init_with, settings, try_settings};
pub use hostname::system_hostname;
