//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `afs_common`; never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use afs_common::{CallRequest, CallResponse, HealthStatus};
use anyhow::Result;

use crate::domain::{AfsConfig, EnvVar, Template};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Parameters for `docker build`.
pub struct BuildSpec<'a> {
    /// Build context directory.
    pub context: &'a str,
    /// Fully qualified tag, e.g. `"docker.io/alice/calc:v1"`.
    pub tag: &'a str,
    /// Environment name recorded in the `afs.env` label.
    pub env_name: &'a str,
    /// Pass `--no-cache`.
    pub no_cache: bool,
}

/// Parameters for `docker run`.
pub struct RunSpec<'a> {
    pub image: &'a str,
    pub name: &'a str,
    pub envs: &'a [EnvVar],
    /// Host port to bind the actor port to; `None` lets Docker choose.
    pub host_port: Option<u16>,
}

// ── Container Engine Port Traits ──────────────────────────────────────────────

/// Image operations: build, tag, push, pull.
#[allow(async_fn_in_trait)]
pub trait ImageBuilder {
    /// Build an image from a context directory.
    async fn build(&self, spec: &BuildSpec<'_>) -> Result<Output>;
    /// Add `target` as a new tag of `source`.
    async fn tag(&self, source: &str, target: &str) -> Result<Output>;
    /// Push an image to its registry.
    async fn push(&self, image: &str) -> Result<Output>;
    /// Pull an image from its registry.
    async fn pull(&self, image: &str) -> Result<Output>;
}

/// Container lifecycle operations: run, stop, remove.
#[allow(async_fn_in_trait)]
pub trait ContainerLifecycle {
    /// Start a detached container.
    async fn run(&self, spec: &RunSpec<'_>) -> Result<Output>;
    /// Stop a running container.
    async fn stop(&self, name: &str) -> Result<Output>;
    /// Remove a stopped container.
    async fn remove(&self, name: &str) -> Result<Output>;
}

/// Container state inspection.
#[allow(async_fn_in_trait)]
pub trait ContainerInspector {
    /// `docker inspect <name>` as JSON.
    async fn inspect(&self, name: &str) -> Result<Output>;
    /// Every container carrying the `afs.managed` label, one JSON object per line.
    async fn list_managed(&self) -> Result<Output>;
    /// The engine's version string.
    async fn version(&self) -> Result<Output>;
}

/// Anything that can build images, manage containers and inspect them.
pub trait ContainerEngine: ImageBuilder + ContainerLifecycle + ContainerInspector {}

/// Blanket implementation: any type implementing all three sub-traits is a `ContainerEngine`.
impl<T> ContainerEngine for T where T: ImageBuilder + ContainerLifecycle + ContainerInspector {}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Call Transport Port ───────────────────────────────────────────────────────

/// Talks to the actor runtime inside a container.
#[allow(async_fn_in_trait)]
pub trait CallTransport {
    /// Probe `GET {endpoint}/health`.
    ///
    /// # Errors
    ///
    /// Returns an error while the endpoint is unreachable or unhealthy.
    async fn health(&self, endpoint: &str) -> Result<HealthStatus>;
    /// Send `POST {endpoint}/call` and decode the structured reply.
    ///
    /// A method that raised is reported as `Ok(CallResponse::Error { .. })`;
    /// `Err` is reserved for transport failures.
    async fn call(
        &self,
        endpoint: &str,
        request: &CallRequest,
        timeout: Duration,
    ) -> Result<CallResponse>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Template Port ─────────────────────────────────────────────────────────────

/// Source of environment templates.
pub trait TemplateSource {
    /// Every available template, sorted by name.
    fn templates(&self) -> Vec<Template>;
    /// Look up one template by name.
    fn get(&self, name: &str) -> Option<Template> {
        self.templates().into_iter().find(|t| t.name == name)
    }
}

// ── Filesystem and Config Ports ───────────────────────────────────────────────

/// Abstracts the local filesystem operations the scaffolder and builder need.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// `true` when `path` is a directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> Result<bool>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults when no file exists.
    fn load(&self) -> Result<AfsConfig>;
    /// Persist configuration.
    fn save(&self, config: &AfsConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
