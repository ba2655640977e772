//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors related to scaffolding an environment directory.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error(
        "Invalid environment name '{0}': must be lowercase alphanumeric with '-' or '_' (max 63 chars)"
    )]
    InvalidName(String),

    #[error("Unknown template '{name}'.\n\nAvailable templates: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("Directory '{0}' already exists and is not empty. Use --force to overwrite.")]
    TargetNotEmpty(String),

    #[error("No Dockerfile found in '{0}'. Run 'afs init' to scaffold an environment.")]
    MissingDockerfile(String),

    #[error("Invalid environment variable '{0}': expected KEY=VALUE")]
    InvalidEnvVar(String),
}

// ── Image errors ──────────────────────────────────────────────────────────────

/// Errors related to image references and registries.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid image reference '{0}'")]
    InvalidReference(String),

    #[error("Invalid tag '{0}': must match [A-Za-z0-9_][A-Za-z0-9_.-]{{0,127}}")]
    InvalidTag(String),

    #[error(
        "No registry configured. Pass --registry, set DOCKER_USERNAME, or run: afs config set registry.default <registry>"
    )]
    NoRegistry,

    #[error("Build of '{tag}' failed:\n{stderr}")]
    BuildFailed { tag: String, stderr: String },

    #[error("Push of '{tag}' failed:\n{stderr}")]
    PushFailed { tag: String, stderr: String },

    #[error("Not logged in to '{registry}'. Run: {}", login_command(.registry, .username.as_deref()))]
    NotLoggedIn {
        registry: String,
        /// Account from `DOCKER_USERNAME`, when set.
        username: Option<String>,
    },
}

fn login_command(registry: &str, username: Option<&str>) -> String {
    match username {
        Some(user) => format!("docker login -u {user} {registry}"),
        None => format!("docker login {registry}"),
    }
}

// ── Container errors ──────────────────────────────────────────────────────────

/// Errors related to running containers.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Invalid container name '{0}': must match [a-zA-Z0-9][a-zA-Z0-9_.-]*")]
    InvalidName(String),

    #[error("Container '{0}' not found. Start one with: afs run <image> --name {0}")]
    NotFound(String),

    #[error("Container '{0}' already exists. Remove it first: afs stop {0}")]
    AlreadyExists(String),

    #[error("Container '{name}' is {state}, not running.")]
    NotRunning { name: String, state: String },

    #[error("Container '{0}' does not publish the actor port.")]
    NoPublishedPort(String),

    #[error("Failed to start container '{name}':\n{stderr}")]
    StartFailed { name: String, stderr: String },

    #[error("Container '{0}' exited during startup. Inspect it with: docker logs {0}")]
    ExitedDuringStartup(String),

    #[error(
        "Container '{name}' did not become ready within {secs}s.\nInspect it with: docker logs {name}\nRemove it with: afs stop {name}"
    )]
    NotReady { name: String, secs: u64 },
}

// ── Call errors ───────────────────────────────────────────────────────────────

/// Errors related to building a method invocation.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("Invalid argument '{0}': expected key=value")]
    InvalidArg(String),

    #[error("Invalid method name '{0}'")]
    InvalidMethod(String),

    #[error("Invalid endpoint '{0}': expected http:// or https:// URL")]
    InvalidEndpoint(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
