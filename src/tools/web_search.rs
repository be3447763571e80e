// Web search tool backed by an external search API

use super::{Tool, ToolError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the web search collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_endpoint() -> String {
    "https://api.tavily.com/search".to_string()
}

fn default_max_results() -> u32 {
    2
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: std::env::var("TAVILY_API_KEY").ok(),
            max_results: default_max_results(),
        }
    }
}

/// Searches the web for current events affecting supply chains.
/// Missing credentials or transport failures degrade to explanatory text.
pub struct WebSearchTool {
    config: WebSearchConfig,
    client: reqwest::Client,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self::with_config(WebSearchConfig::default())
    }

    pub fn with_config(config: WebSearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    async fn search(&self, query: &str) -> String {
        let Some(api_key) = &self.config.api_key else {
            return "Web search unavailable: no API key configured. \
                Set TAVILY_API_KEY to enable live search results."
                .to_string();
        };

        let request = SearchRequest {
            api_key: api_key.clone(),
            query: query.to_string(),
            max_results: self.config.max_results,
        };

        let response = match self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return format!("Web search failed: {}", e),
        };

        if !response.status().is_success() {
            return format!("Web search failed: API returned status {}", response.status());
        }

        let parsed: SearchResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => return format!("Web search failed: could not parse response ({})", e),
        };

        if parsed.results.is_empty() {
            return format!("No web results found for '{}'.", query);
        }

        let mut report = format!("Web search results for '{}':\n\n", query);
        for result in parsed.results {
            report.push_str(&format!("- {} ({})\n  {}\n", result.title, result.url, result.content));
        }
        report
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information such as news and weather affecting supply chains"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError> {
        let query = args["query"].as_str().unwrap_or_default();
        if query.is_empty() {
            return Ok("Error: a non-empty search query is required.".to_string());
        }
        Ok(self.search(query).await)
    }
}

#[derive(Serialize)]
struct SearchRequest {
    api_key: String,
    query: String,
    max_results: u32,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_degrades_to_text() {
        let tool = WebSearchTool::with_config(WebSearchConfig {
            endpoint: default_endpoint(),
            api_key: None,
            max_results: 2,
        });
        let result = tool
            .invoke(&serde_json::json!({"query": "port congestion"}))
            .await
            .unwrap();
        assert!(result.contains("Web search unavailable"));
    }

    #[tokio::test]
    async fn test_empty_query_is_error_text() {
        let tool = WebSearchTool::new();
        let result = tool.invoke(&serde_json::json!({})).await.unwrap();
        assert!(result.starts_with("Error:"));
    }
}
