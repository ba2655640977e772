//! Method invocation arguments.
//!
//! Pure functions only, no I/O.

use std::sync::LazyLock;

use afs_common::CallRequest;
use anyhow::Result;
use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::error::CallError;

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

/// Parse a single `key=value` argument.
///
/// The value is decoded as JSON when it is valid JSON (`10`, `true`,
/// `null`, `[1,2]`, `{"a":1}`, `"quoted"`), otherwise it is passed through
/// as a plain string.
///
/// # Errors
///
/// Returns [`CallError::InvalidArg`] when there is no `=` or the key is empty.
pub fn parse_call_arg(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(CallError::InvalidArg(raw.to_string()).into());
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CallError::InvalidArg(raw.to_string()).into());
    }
    let value = serde_json::from_str::<Value>(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Build the kwargs object from repeated `--arg` flags. Later keys win.
///
/// # Errors
///
/// Returns the first [`CallError::InvalidArg`] encountered.
pub fn parse_call_args(raw: &[String]) -> Result<Map<String, Value>> {
    let mut kwargs = Map::new();
    for arg in raw {
        let (key, value) = parse_call_arg(arg)?;
        kwargs.insert(key, value);
    }
    Ok(kwargs)
}

/// Build a validated [`CallRequest`].
///
/// # Errors
///
/// Returns [`CallError::InvalidMethod`] for names that cannot be an actor
/// method, or the first invalid argument.
pub fn build_request(method: &str, raw_args: &[String]) -> Result<CallRequest> {
    if !METHOD_RE.is_match(method) {
        return Err(CallError::InvalidMethod(method.to_string()).into());
    }
    Ok(CallRequest::new(method, parse_call_args(raw_args)?))
}

/// Normalize a user-supplied endpoint: require http(s), drop trailing `/`.
///
/// # Errors
///
/// Returns [`CallError::InvalidEndpoint`] for anything that is not an
/// http(s) URL.
pub fn normalize_endpoint(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(CallError::InvalidEndpoint(raw.to_string()).into()),
    }
}

/// Endpoint for a container whose actor port is published on `host_port`.
#[must_use]
pub fn local_endpoint(host_port: u16) -> String {
    format!("http://127.0.0.1:{host_port}")
}
