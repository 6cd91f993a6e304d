use std::fs;
use std::sync::Arc;

use mpt_config::{init_with, settings, try_settings, ConfigError, ConfigResolver, NoOpLogger};
use tempfile::tempdir;

#[test]
fn settings_are_installed_once_per_process() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("config.toml"), "project_name = \"Global\"\n").unwrap();

    let resolver = ConfigResolver::new()
        .with_root(root.path())
        .without_secret_store()
        .with_logger(Arc::new(NoOpLogger));

    assert!(try_settings().is_none());

    let installed = init_with(&resolver).unwrap();
    assert_eq!(installed.project_name(), "Global");

    // later reads see the same value, even after the file changes
    fs::write(root.path().join("config.toml"), "project_name = \"Changed\"\n").unwrap();
    let read_back = settings().unwrap();
    assert!(std::ptr::eq(installed, read_back));
    assert_eq!(try_settings().map(|s| s.project_name()), Some("Global"));

    assert!(matches!(
        init_with(&resolver),
        Err(ConfigError::AlreadyInitialized)
    ));
}
