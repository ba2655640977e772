//! Container state as reported by `docker inspect` / `docker ps`.
//!
//! Parsing only; the commands themselves are run by the infra layer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use afs_common::{ACTOR_PORT, ContainerSummary, actor_port_spec};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// Container state as observed from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Exited,
    Dead,
    NotFound,
}

impl ContainerState {
    fn from_docker(status: &str) -> Self {
        match status {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "dead" => Self::Dead,
            _ => Self::Exited,
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::NotFound => "not found",
        })
    }
}

/// The fields of `docker inspect` that afs cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub name: String,
    pub image: String,
    pub state: ContainerState,
    /// Host port bound to the actor port, if published.
    pub host_port: Option<u16>,
    pub labels: BTreeMap<String, String>,
}

// Subset of the `docker inspect` schema.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectEntry {
    name: String,
    config: InspectConfig,
    state: InspectState,
    #[serde(default)]
    network_settings: Option<InspectNetwork>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectConfig {
    image: String,
    #[serde(default)]
    labels: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectState {
    status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectNetwork {
    #[serde(default)]
    ports: Option<BTreeMap<String, Option<Vec<PortBinding>>>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PortBinding {
    host_port: String,
}

/// Parse `docker inspect <container>` stdout.
///
/// Returns `None` for an empty array (what Docker prints for an unknown
/// container).
///
/// # Errors
///
/// Returns an error if the output is not the expected JSON shape.
pub fn parse_inspect(stdout: &[u8]) -> Result<Option<ContainerInfo>> {
    let entries: Vec<InspectEntry> =
        serde_json::from_slice(stdout).context("parsing docker inspect output")?;
    let Some(entry) = entries.into_iter().next() else {
        return Ok(None);
    };

    let host_port = entry
        .network_settings
        .and_then(|n| n.ports)
        .and_then(|mut ports| ports.remove(&actor_port_spec()))
        .flatten()
        .and_then(|bindings| {
            bindings
                .iter()
                .find_map(|b| b.host_port.parse::<u16>().ok())
        });

    Ok(Some(ContainerInfo {
        name: entry.name.trim_start_matches('/').to_string(),
        image: entry.config.image,
        state: ContainerState::from_docker(&entry.state.status),
        host_port,
        labels: entry.config.labels.unwrap_or_default(),
    }))
}

static PS_PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(&format!(r":(\d+)->{ACTOR_PORT}/tcp")).expect("valid regex")
});

// One line of `docker ps --format '{{json .}}'`.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PsLine {
    names: String,
    image: String,
    status: String,
    #[serde(default)]
    ports: String,
}

/// Parse `docker ps --format '{{json .}}'` stdout (one JSON object per line).
///
/// # Errors
///
/// Returns an error if a non-empty line is not valid JSON.
pub fn parse_ps(stdout: &[u8]) -> Result<Vec<ContainerSummary>> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let row: PsLine = serde_json::from_str(line).context("parsing docker ps output")?;
            let host_port = PS_PORT_RE
                .captures(&row.ports)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok());
            Ok(ContainerSummary {
                name: row.names,
                image: row.image,
                status: row.status,
                host_port,
            })
        })
        .collect()
}
