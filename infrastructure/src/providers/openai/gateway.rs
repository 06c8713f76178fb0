//! Chat-completions gateway implementing [`LlmGateway`].

use super::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use bootsmith_application::ports::llm_gateway::{GatewayError, LlmGateway, ModelTurn};
use bootsmith_domain::{Conversation, ToolCallRequest};
use std::time::Duration;
use tracing::debug;

/// Request timeout; tool-heavy completions can take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway against an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[serde_json::Value],
        temperature: f32,
    ) -> Result<ModelTurn, GatewayError> {
        let request = ChatRequest {
            model: &self.model,
            messages: conversation.messages(),
            tools: (!tools.is_empty()).then_some(tools),
            tool_choice: (!tools.is_empty()).then_some("auto"),
            temperature,
        };

        debug!(
            "Chat request: model={}, {} messages, {} tools",
            self.model,
            conversation.len(),
            tools.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "{} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body.chars().take(500).collect::<String>()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedResponse("response had no choices".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .into_iter()
            .map(|c| ToolCallRequest::new(c.function.name, c.function.arguments))
            .collect();

        Ok(ModelTurn {
            content: choice.message.content,
            tool_calls,
        })
    }
}
