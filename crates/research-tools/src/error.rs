//! Error types for tool operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// The typed tool methods never return these to their callers. Each tool
/// renders its failures into an `{"error": ...}` object with its own message
/// prefix; only argument decoding and dispatch surface a `ToolError` directly.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Required configuration is absent.
    #[error("{0}")]
    Configuration(String),

    /// Connection, DNS, timeout or URL failure before a response arrived.
    #[error("{0}")]
    Transport(String),

    /// The upstream service answered with a non-success status.
    #[error("{detail}")]
    UpstreamStatus { status: StatusCode, detail: String },

    /// The response body could not be decoded or parsed.
    #[error("{0}")]
    Parse(String),
}

impl ToolError {
    /// HTTP status of an upstream failure, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ToolError::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ToolError::UpstreamStatus {
                status,
                detail: err.to_string(),
            },
            None if err.is_decode() => ToolError::Parse(err.to_string()),
            None => ToolError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Parse(err.to_string())
    }
}

impl From<roxmltree::Error> for ToolError {
    fn from(err: roxmltree::Error) -> Self {
        ToolError::Parse(err.to_string())
    }
}
