//! Domain types and validators for afs configuration.
//!
//! Pure functions only, no I/O.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::image::resolve_registry;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "registry.default",
    "runtime.ready_timeout_secs",
    "call.timeout_secs",
];

const DEFAULT_READY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 60;
/// Upper bound for both timeouts (one hour).
const MAX_TIMEOUT_SECS: u64 = 3600;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.afs/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AfsConfig {
    pub registry: RegistryConfig,
    pub runtime: RuntimeConfig,
    pub call: CallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry (optionally with namespace) used by `build --push` and
    /// `publish` when `--registry` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// How long `afs run` waits for the health endpoint.
    pub ready_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ready_timeout_secs: DEFAULT_READY_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CallConfig {
    /// Request timeout for `afs call`.
    pub timeout_secs: u64,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
        }
    }
}

impl AfsConfig {
    /// Registry for pushes, applying the flag > config > `DOCKER_USERNAME`
    /// precedence.
    #[must_use]
    pub fn registry_for(&self, explicit: Option<&str>, docker_username: Option<&str>) -> Option<String> {
        resolve_registry(explicit, self.registry.default.as_deref(), docker_username)
    }

    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "registry.default" => {
                let value = value.trim().trim_end_matches('/');
                self.registry.default = (!value.is_empty()).then(|| value.to_string());
            }
            "runtime.ready_timeout_secs" => self.runtime.ready_timeout_secs = parse_secs(key, value)?,
            "call.timeout_secs" => self.call.timeout_secs = parse_secs(key, value)?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "runtime.ready_timeout_secs" | "call.timeout_secs" => parse_secs(key, value).map(|_| ()),
        "registry.default" if value.chars().any(char::is_whitespace) => {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                expected: "a registry such as docker.io/<user> or ghcr.io/<org>".to_string(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if (1..=MAX_TIMEOUT_SECS).contains(&secs) => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: format!("whole seconds between 1 and {MAX_TIMEOUT_SECS}"),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
