// Ollama chat API backend for the LanguageModel capability

use super::{ChatMessage, ChatOptions, LanguageModel, LlmError, ToolSpec};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Ollama backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_model() -> String {
    "gpt-oss:20b".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout() -> u64 {
    120_000
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout(),
        }
    }
}

impl OllamaConfig {
    /// Read model and endpoint overrides from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            config.model = model;
        }
        if let Ok(endpoint) = std::env::var("OLLAMA_ENDPOINT") {
            config.endpoint = endpoint;
        }
        config
    }
}

/// Ollama-backed chat model
pub struct OllamaChat {
    config: OllamaConfig,
    client: reqwest::Client,
}

impl OllamaChat {
    pub fn new(model: impl Into<String>) -> Self {
        let mut config = OllamaConfig::default();
        config.model = model.into();
        Self::with_config(config)
    }

    pub fn with_config(config: OllamaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl LanguageModel for OllamaChat {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        options: &ChatOptions,
    ) -> Result<ChatMessage, LlmError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            stream: false,
            format: if options.json_format {
                Some("json".to_string())
            } else {
                None
            },
            options: options.temperature.map(|temperature| GenerateOptions { temperature }),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.config.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LlmError::LlmError(format!(
                "LLM request failed: {}",
                response.status()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        Ok(chat_response.message)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolSpec>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OllamaConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert!(!config.model.is_empty());
    }

    #[test]
    fn test_client_creation() {
        let backend = OllamaChat::new("test-model");
        assert_eq!(backend.model(), "test-model");
    }
}
