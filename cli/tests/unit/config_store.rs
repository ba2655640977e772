//! Tests for the YAML config store and the config use-cases.

#![allow(clippy::expect_used, unsafe_code)]

use afs_cli::application::ports::ConfigStore;
use afs_cli::application::services::config_service::{load_config, set_config};
use afs_cli::domain::{AfsConfig, ConfigError};
use afs_cli::infra::config::{CONFIG_ENV, YamlConfigStore};
use serial_test::serial;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> YamlConfigStore {
    YamlConfigStore::at(dir.path().join("nested").join("config.yaml"))
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let config = load_config(&store_in(&dir)).expect("load");
    assert_eq!(config, AfsConfig::default());
    assert_eq!(config.runtime.ready_timeout_secs, 30);
    assert_eq!(config.call.timeout_secs, 60);
}

#[test]
fn empty_file_yields_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "\n").expect("write");
    let config = YamlConfigStore::at(&path).load().expect("load");
    assert_eq!(config, AfsConfig::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "registry:\n  default: ghcr.io/org\n").expect("write");
    let config = YamlConfigStore::at(&path).load().expect("load");
    assert_eq!(config.registry.default.as_deref(), Some("ghcr.io/org"));
    assert_eq!(config.call.timeout_secs, 60);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "runtime: [not, a, map").expect("write");
    let err = YamlConfigStore::at(&path).load().expect_err("malformed");
    assert!(err.to_string().contains("cannot parse"), "got: {err}");
}

#[test]
fn set_persists_and_reloads() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    set_config(&store, "registry.default", "docker.io/alice/").expect("set registry");
    set_config(&store, "call.timeout_secs", "120").expect("set timeout");

    let config = load_config(&store).expect("reload");
    assert_eq!(config.registry.default.as_deref(), Some("docker.io/alice"));
    assert_eq!(config.call.timeout_secs, 120);
    assert_eq!(config.runtime.ready_timeout_secs, 30);
}

#[test]
fn set_rejects_unknown_key_without_writing() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let err = set_config(&store, "registry.mirror", "x").expect_err("unknown key");
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
    assert!(!store.path().expect("path").exists());
}

#[test]
fn set_rejects_zero_timeout() {
    let dir = TempDir::new().expect("tempdir");
    let err = set_config(&store_in(&dir), "runtime.ready_timeout_secs", "0").expect_err("zero");
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "runtime.ready_timeout_secs"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.save(&AfsConfig::default()).expect("save");
    let mode = std::fs::metadata(store.path().expect("path"))
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
#[serial]
fn env_var_overrides_default_location() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("from-env.yaml");
    // SAFETY: serialized with every other test touching AFS_CONFIG.
    unsafe { std::env::set_var(CONFIG_ENV, &path) };
    let resolved = YamlConfigStore::new().path();
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert_eq!(resolved.expect("path"), path);
}

#[test]
#[serial]
fn explicit_path_beats_env_var() {
    let dir = TempDir::new().expect("tempdir");
    let explicit = dir.path().join("explicit.yaml");
    // SAFETY: serialized with every other test touching AFS_CONFIG.
    unsafe { std::env::set_var(CONFIG_ENV, dir.path().join("env.yaml")) };
    let resolved = YamlConfigStore::at(&explicit).path();
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert_eq!(resolved.expect("path"), explicit);
}
