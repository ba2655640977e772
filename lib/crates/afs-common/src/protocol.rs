/// TCP port the actor runtime listens on inside the container.
pub const ACTOR_PORT: u16 = 8000;

/// Readiness probe. Returns `200` with a `HealthStatus` body once the actor
/// has been constructed.
pub const HEALTH_PATH: &str = "/health";

/// Method invocation endpoint.
/// Body: JSON-serialized `CallRequest`
/// Response: JSON-serialized `CallResponse` (always `200` when the runtime
/// itself is healthy, even for method errors)
pub const CALL_PATH: &str = "/call";

/// Label set on every container started by `afs run`.
/// Value: "true"
pub const LABEL_MANAGED: &str = "afs.managed";

/// Label set on every image built by `afs build`.
/// Value: environment (repository) name
pub const LABEL_ENV: &str = "afs.env";

/// Docker port spec for the actor port, e.g. `"8000/tcp"`.
#[must_use]
pub fn actor_port_spec() -> String {
    format!("{ACTOR_PORT}/tcp")
}

/// Label filter helpers for `docker ps --filter`.
pub mod labels {
    use super::LABEL_MANAGED;

    /// `label=afs.managed=true`
    #[must_use]
    pub fn managed_filter() -> String {
        format!("label={LABEL_MANAGED}=true")
    }

    /// `afs.managed=true`, for `docker run --label`.
    #[must_use]
    pub fn managed_label() -> String {
        format!("{LABEL_MANAGED}=true")
    }
}
