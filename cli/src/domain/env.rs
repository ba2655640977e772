//! Environment names, container names and `KEY=VALUE` pairs.
//!
//! Pure functions only, no I/O.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::domain::error::{ContainerError, EnvError};

/// Environment names end up as directory names and image repositories, so
/// they are restricted to what Docker accepts in a repository path component.
pub static ENV_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([a-z0-9_-]{0,61}[a-z0-9])?$").expect("valid regex")
});

/// Same rule the Docker daemon enforces for `--name`.
pub static CONTAINER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$").expect("valid regex")
});

pub static ENV_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

/// Validates an environment name.
///
/// # Errors
///
/// Returns [`EnvError::InvalidName`] if the name is not a valid repository
/// path component.
pub fn validate_env_name(name: &str) -> Result<()> {
    if !ENV_NAME_RE.is_match(name) {
        return Err(EnvError::InvalidName(name.to_string()).into());
    }
    Ok(())
}

/// Validates a container name.
///
/// # Errors
///
/// Returns [`ContainerError::InvalidName`] if Docker would reject the name.
pub fn validate_container_name(name: &str) -> Result<()> {
    if !CONTAINER_NAME_RE.is_match(name) {
        return Err(ContainerError::InvalidName(name.to_string()).into());
    }
    Ok(())
}

/// PascalCase form of an environment name, used as the actor class name.
///
/// `"my-calc_env"` → `"MyCalcEnv"`. Digit-leading names get an `Env` prefix
/// so the result is a valid identifier.
#[must_use]
pub fn class_name(env_name: &str) -> String {
    let mut out = String::with_capacity(env_name.len());
    for part in env_name.split(['-', '_']).filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "Env");
    }
    out
}

/// A single `KEY=VALUE` environment variable for `afs run --env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    /// Render as the `KEY=VALUE` argument passed to `docker run -e`.
    #[must_use]
    pub fn to_arg(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Parse `KEY=VALUE`. The value may be empty and may itself contain `=`.
///
/// # Errors
///
/// Returns [`EnvError::InvalidEnvVar`] when there is no `=` or the key is not
/// a valid shell identifier.
pub fn parse_env_var(raw: &str) -> Result<EnvVar> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(EnvError::InvalidEnvVar(raw.to_string()).into());
    };
    if !ENV_KEY_RE.is_match(key) {
        return Err(EnvError::InvalidEnvVar(raw.to_string()).into());
    }
    Ok(EnvVar {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse every `--env` flag, failing on the first invalid one.
///
/// # Errors
///
/// Returns the first [`EnvError::InvalidEnvVar`] encountered.
pub fn parse_env_vars(raw: &[String]) -> Result<Vec<EnvVar>> {
    raw.iter().map(|r| parse_env_var(r)).collect()
}
