//! LLM Gateway port
//!
//! Defines the interface for communicating with the chat-completions
//! provider. Each call carries the full conversation — steps are
//! independent, stateless exchanges, so there is no session object to hold
//! between turns.

use async_trait::async_trait;
use bootsmith_domain::{Conversation, ToolCallRequest};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One model turn: optional natural-language content plus zero or more tool
/// call requests, in the order the model produced them.
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCallRequest>,
}

impl ModelTurn {
    /// Create a text-only turn.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    pub fn text_content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Gateway for chat-completions requests.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a conversation with a declared tool list (provider-shaped JSON
    /// schemas, empty to disable tools) and automatic tool choice.
    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[serde_json::Value],
        temperature: f32,
    ) -> Result<ModelTurn, GatewayError>;
}
