//! Wire types for the OpenAI-compatible chat and embeddings APIs.
//!
//! Request bodies borrow where possible; responses own their data.
//! `function.arguments` arrives as a JSON-encoded string and is passed
//! through untouched — the domain parses it at dispatch time.

use bootsmith_domain::Message;
use serde::{Deserialize, Serialize};

/// POST `{base_url}/chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [serde_json::Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct WireToolCall {
    pub function: WireFunction,
}

#[derive(Debug, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// JSON-encoded argument object, as a string.
    pub arguments: String,
}

/// POST `{base_url}/embeddings`
#[derive(Debug, Serialize)]
pub struct EmbeddingsRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingsResponse {
    pub data: Vec<EmbeddingObject>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingObject {
    pub index: usize,
    pub embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let messages = vec![
            Message::system("You are a programmer."),
            Message::user("Set up eslint."),
        ];
        let tools = vec![serde_json::json!({"type": "function"})];
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            tools: Some(&tools),
            tool_choice: Some("auto"),
            temperature: 0.1,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["tool_choice"], "auto");
        // Messages without a name must not carry a null name field.
        assert!(value["messages"][0].get("name").is_none());
    }

    #[test]
    fn test_function_message_carries_name() {
        let message = Message::function("writeToFile", "Created file: a.txt");
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["role"], "function");
        assert_eq!(value["name"], "writeToFile");
    }

    #[test]
    fn test_chat_response_with_tool_calls() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "writeToFile",
                            "arguments": "{\"filepath\":\"a.txt\",\"data\":\"hi\"}"
                        }
                    }]
                }
            }]
        }"#;

        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        let message = &response.choices[0].message;
        assert!(message.content.is_none());
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].function.name, "writeToFile");
    }

    #[test]
    fn test_chat_response_without_tool_calls_field() {
        let raw = r#"{"choices": [{"message": {"content": "Done."}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(response.choices[0].message.content.as_deref(), Some("Done."));
        assert!(response.choices[0].message.tool_calls.is_empty());
    }
}
