// Tool implementations and the registry the specialists bind them through

mod compliance;
mod disruption;
mod financial;
mod web_search;

pub use compliance::ComplianceTool;
pub use disruption::DisruptionRiskTool;
pub use financial::{CostComparisonTool, FinancialRiskTool, TcoTool};
pub use web_search::WebSearchTool;

use crate::llm::{ToolCall, ToolSpec};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// The tool capability: a typed function returning formatted text.
///
/// Tools report data-not-found and bad-argument conditions as normal text
/// results so the model can narrate them; `Err` is reserved for conditions
/// the caller itself must degrade from.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Function name advertised to the model
    fn name(&self) -> &str;

    /// One-line description for the function schema
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments
    fn parameters(&self) -> serde_json::Value;

    async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Tool error: {0}")]
    ToolError(String),
}

/// A named set of tools bound to one specialist
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.tools.insert(name, tool);
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Function schemas in registration order
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolSpec::function(tool.name(), tool.description(), tool.parameters()))
            .collect()
    }

    /// Execute one tool call, degrading every failure to formatted text so
    /// the conversation can continue.
    pub async fn execute(&self, call: &ToolCall) -> String {
        let name = &call.function.name;
        match self.tools.get(name) {
            Some(tool) => match tool.invoke(&call.function.arguments).await {
                Ok(report) => report,
                Err(e) => format!("Error executing tool '{}': {}", name, e),
            },
            None => format!("Error: Unknown tool '{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FunctionCall;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn parameters(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError> {
            Ok(args["text"].as_str().unwrap_or_default().to_string())
        }
    }

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            function: FunctionCall {
                name: name.to_string(),
                arguments: args,
            },
        }
    }

    #[tokio::test]
    async fn test_execute_known_tool() {
        let set = ToolSet::new().with(Arc::new(EchoTool));
        let result = set.execute(&call("echo", serde_json::json!({"text": "hi"}))).await;
        assert_eq!(result, "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_degrades_to_text() {
        let set = ToolSet::new().with(Arc::new(EchoTool));
        let result = set.execute(&call("missing", serde_json::json!({}))).await;
        assert!(result.contains("Unknown tool"));
    }

    #[test]
    fn test_specs_keep_registration_order() {
        let set = ToolSet::new().with(Arc::new(EchoTool));
        let specs = set.specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].function.name, "echo");
    }
}
