//! Tool trait definition and types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ToolError;

/// Arguments passed to a tool for execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Parameters as key-value pairs.
    pub params: HashMap<String, Value>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self { params }
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Get an integer parameter with a default value.
    ///
    /// Models are loose about numeric types, so floats are truncated and
    /// numeric strings are parsed. A missing or `null` value yields `default`.
    pub fn get_integer_or(&self, key: &str, default: i64) -> Result<i64, ToolError> {
        let invalid = |reason: &str| ToolError::InvalidParameter {
            name: key.to_string(),
            reason: reason.to_string(),
        };

        match self.params.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .ok_or_else(|| invalid("expected integer")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid("expected integer")),
            Some(_) => Err(invalid("expected integer")),
        }
    }
}

/// Output from a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result content, always a JSON document.
    pub content: String,
    /// Whether the execution was successful.
    pub success: bool,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed output.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
        }
    }

    /// Serialize a success record as pretty-printed JSON.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(content) => Self::success(content),
            Err(e) => Self::error(format!("Serialization failed: {}", e)),
        }
    }

    /// Build the `{"error": ...}` shape.
    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(format!("{:#}", json!({ "error": message.into() })))
    }

    /// Render a tool result, turning the error into the tool's own message.
    pub(crate) fn from_result<T, F>(tool: &str, result: Result<T, ToolError>, describe: F) -> Self
    where
        T: Serialize,
        F: FnOnce(ToolError) -> String,
    {
        match result {
            Ok(value) => Self::json(&value),
            Err(e) => {
                let message = describe(e);
                warn!("{} failed: {}", tool, message);
                Self::error(message)
            }
        }
    }
}

/// Clamp an integer argument into an inclusive range.
pub(crate) fn clamp_arg(value: i64, min: i64, max: i64) -> u32 {
    value.clamp(min, max) as u32
}

/// Trait for tools exposed to a research agent.
///
/// Tools take scalar parameters and always produce a JSON document. Failures
/// inside the tool come back as `ToolOutput { success: false, .. }` holding an
/// `{"error": ...}` object; `Err` is reserved for arguments that cannot be
/// decoded at all.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema of the accepted parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}
