// LLM capability seam - chat models with optional tool binding

pub mod ollama;

pub use ollama::{OllamaChat, OllamaConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat message in model wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    /// Tool calls the model wants executed before it can continue
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }
}

/// A structured request from the model to execute a named function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Function schema advertised to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDef,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// Per-request generation options
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    /// Ask the backend for a strict JSON object response
    pub json_format: bool,
}

impl ChatOptions {
    pub fn deterministic() -> Self {
        Self {
            temperature: Some(0.0),
            json_format: false,
        }
    }

    pub fn deterministic_json() -> Self {
        Self {
            temperature: Some(0.0),
            json_format: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// The LLM capability: given messages (and optionally bound tools),
/// produce one response message which may carry pending tool calls.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        options: &ChatOptions,
    ) -> Result<ChatMessage, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_tool_calls_empty_by_default() {
        let msg = ChatMessage::assistant("done");
        assert!(msg.pending_tool_calls().is_empty());
    }

    #[test]
    fn test_tool_spec_shape() {
        let spec = ToolSpec::function(
            "lookup",
            "Look something up",
            serde_json::json!({"type": "object", "properties": {}}),
        );
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "lookup");
    }
}
