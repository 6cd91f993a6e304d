//! Process-wide settings, resolved once

use once_cell::sync::OnceCell;

use super::config_resolver::ConfigResolver;
use crate::config::{ConfigError, ConfigResult, Settings};

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// The process settings, resolving with [`ConfigResolver::new`] on first use
///
/// A failed resolution is returned and not cached, so the entry point can
/// report it and exit.
pub fn settings() -> ConfigResult<&'static Settings> {
    SETTINGS.get_or_try_init(|| ConfigResolver::new().resolve())
}

/// Resolve with `resolver` and install the result as the process settings
///
/// Fails with [`ConfigError::AlreadyInitialized`] if settings were already
/// installed, either by an earlier call or by [`settings`].
pub fn init_with(resolver: &ConfigResolver) -> ConfigResult<&'static Settings> {
    if SETTINGS.get().is_some() {
        return Err(ConfigError::AlreadyInitialized);
    }
    let resolved = resolver.resolve()?;
    SETTINGS
        .try_insert(resolved)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The process settings if they have been resolved
pub fn try_settings() -> Option<&'static Settings> {
    SETTINGS.get()
}
