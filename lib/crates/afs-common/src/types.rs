use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A method invocation sent to an environment's call endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRequest {
    /// Name of the actor method to invoke.
    pub method: String,
    /// Keyword arguments passed to the method.
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl CallRequest {
    #[must_use]
    pub fn new(method: impl Into<String>, kwargs: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            kwargs,
        }
    }
}

/// Structured reply from the call endpoint.
///
/// Serialized with an internal `status` tag:
/// `{"status":"ok","result":...}` or
/// `{"status":"error","error":"...","error_type":"..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CallResponse {
    Ok {
        #[serde(default)]
        result: Value,
    },
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error_type: Option<String>,
    },
}

/// The method raised inside the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", render_remote(.kind, .message))]
pub struct RemoteError {
    /// Exception/error class reported by the runtime, when known.
    pub kind: Option<String>,
    pub message: String,
}

#[allow(clippy::ref_option)]
fn render_remote(kind: &Option<String>, message: &str) -> String {
    match kind {
        Some(kind) => format!("{kind}: {message}"),
        None => message.to_string(),
    }
}

impl CallResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, CallResponse::Ok { .. })
    }

    /// Convert into the method's result, or the error it raised.
    pub fn into_result(self) -> Result<Value, RemoteError> {
        match self {
            CallResponse::Ok { result } => Ok(result),
            CallResponse::Error { error, error_type } => Err(RemoteError {
                kind: error_type,
                message: error,
            }),
        }
    }
}

/// Body of a `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    /// Actor class served by the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// One row of `afs ps`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerSummary {
    pub name: String,
    pub image: String,
    /// Raw `docker ps` status column, e.g. `"Up 3 minutes"`.
    pub status: String,
    /// Host port mapped to the actor port, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<u16>,
}
