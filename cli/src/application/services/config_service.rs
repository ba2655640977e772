//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AfsConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<AfsConfig> {
    store.load()
}

/// Validate, apply and persist a single `key = value` setting.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or an unwritable file.
pub fn set_config(store: &impl ConfigStore, key: &str, value: &str) -> Result<AfsConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    tracing::debug!(key, "configuration updated");
    Ok(config)
}
