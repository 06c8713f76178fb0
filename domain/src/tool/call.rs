//! Tool call requests emitted by the model.
//!
//! The chat API returns tool calls with their arguments as a JSON-encoded
//! string; [`ToolCallRequest::parse_arguments`] turns that into a
//! [`ToolArguments`] mapping before dispatch. Malformed JSON is an
//! [`ArgumentError`] — the orchestration loop logs and skips the call, it
//! never aborts the step.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Failure to turn a request's raw argument string into a mapping.
#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("Malformed tool arguments: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Tool arguments must be a JSON object, got: {0}")]
    NotAnObject(String),
}

/// A tool call as requested by the model, before argument parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the requested tool.
    pub tool_name: String,
    /// JSON-encoded argument object, exactly as the model produced it.
    pub raw_arguments: String,
}

impl ToolCallRequest {
    pub fn new(tool_name: impl Into<String>, raw_arguments: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            raw_arguments: raw_arguments.into(),
        }
    }

    /// Parse the raw argument string into a structured mapping.
    pub fn parse_arguments(&self) -> Result<ToolArguments, ArgumentError> {
        let value: serde_json::Value = serde_json::from_str(&self.raw_arguments)?;
        match value {
            serde_json::Value::Object(map) => Ok(ToolArguments {
                values: map.into_iter().collect(),
            }),
            other => Err(ArgumentError::NotAnObject(other.to_string())),
        }
    }
}

/// Parsed tool arguments with typed accessors.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    values: HashMap<String, serde_json::Value>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(|v| v.as_bool())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
