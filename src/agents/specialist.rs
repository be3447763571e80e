// Specialist agents - an LLM bound to a fixed tool set, looped until the
// model answers without requesting tools

use super::{Agent, AgentError};
use crate::knowledge::RagSearchTool;
use crate::llm::{ChatMessage, ChatOptions, LanguageModel, ToolCall};
use crate::message::{Message, MessageType};
use crate::tools::{
    ComplianceTool, CostComparisonTool, DisruptionRiskTool, FinancialRiskTool, TcoTool, ToolSet,
    WebSearchTool,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Upper bound on generate/execute rounds per invocation. The model normally
/// terminates itself by answering without tool calls; the cap guards against
/// a model that keeps requesting tools forever.
const MAX_TOOL_ITERATIONS: usize = 8;

/// Tool-loop phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Generating,
    ExecutingTools,
}

/// A tool-augmented specialist with checkpointed per-session history.
///
/// Each construction mints a fresh session identifier, so separate specialist
/// instances never share conversation state. `reset` starts a new session;
/// prior sessions stay retrievable through the checkpoint map.
pub struct SpecialistAgent {
    name: String,
    capabilities: Vec<String>,
    example_queries: Vec<String>,
    llm: Arc<dyn LanguageModel>,
    tools: ToolSet,
    session_id: String,
    sessions: HashMap<String, Vec<ChatMessage>>,
}

impl SpecialistAgent {
    pub fn new(
        name: impl Into<String>,
        llm: Arc<dyn LanguageModel>,
        tools: ToolSet,
    ) -> Self {
        Self {
            name: name.into(),
            capabilities: Vec::new(),
            example_queries: Vec::new(),
            llm,
            tools,
            session_id: fresh_session_id(),
            sessions: HashMap::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_example_queries(mut self, example_queries: Vec<String>) -> Self {
        self.example_queries = example_queries;
        self
    }

    /// The supply chain specialist: web search, disruption risk, compliance,
    /// and retrieval-augmented search over the knowledge base
    pub fn supply_chain(llm: Arc<dyn LanguageModel>) -> Self {
        let tools = ToolSet::new()
            .with(Arc::new(WebSearchTool::new()))
            .with(Arc::new(DisruptionRiskTool))
            .with(Arc::new(ComplianceTool))
            .with(Arc::new(RagSearchTool::default()));

        Self::new("Supply Chain Agent", llm, tools)
            .with_capabilities(vec![
                "Web search".to_string(),
                "Tool calling".to_string(),
                "Memory".to_string(),
                "RAG".to_string(),
            ])
            .with_example_queries(vec![
                "Give me a short intro to the fundamentals of supply chain.".to_string(),
                "What is the compliance status for SUP001?".to_string(),
                "What is the disruption risk for semiconductors in Southeast Asia?".to_string(),
            ])
    }

    /// The financial specialist: TCO, financial risk, and cost comparison
    pub fn financial(llm: Arc<dyn LanguageModel>) -> Self {
        let tools = ToolSet::new()
            .with(Arc::new(TcoTool))
            .with(Arc::new(FinancialRiskTool))
            .with(Arc::new(CostComparisonTool));

        Self::new("Financial Agent", llm, tools)
            .with_capabilities(vec!["Tool calls".to_string()])
            .with_example_queries(vec![
                "What is the total cost of ownership for SUP001 for a volume of 10000 and unit price $0.5?"
                    .to_string(),
                "What is the financial risk for SUP001?".to_string(),
                "Compare costs for SUP001 and SUP002 assuming SUP001 is in Mexico and SUP002 is in China."
                    .to_string(),
            ])
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Drive the generate/execute loop to completion on the given transcript.
    /// Appends each model response and tool result to the transcript and
    /// returns when the model answers without pending tool calls.
    async fn run_tool_loop(
        &self,
        transcript: &mut Vec<ChatMessage>,
    ) -> Result<ChatMessage, AgentError> {
        let specs = self.tools.specs();
        let options = ChatOptions::default();

        let mut state = LoopState::Generating;
        let mut pending: Vec<ToolCall> = Vec::new();

        for _ in 0..MAX_TOOL_ITERATIONS {
            match state {
                LoopState::Generating => {
                    let response = self.llm.chat(transcript, &specs, &options).await?;
                    pending = response.pending_tool_calls().to_vec();
                    transcript.push(response.clone());

                    if pending.is_empty() {
                        return Ok(response);
                    }
                    state = LoopState::ExecutingTools;
                }
                LoopState::ExecutingTools => {
                    for call in pending.drain(..) {
                        let result = self.tools.execute(&call).await;
                        transcript.push(ChatMessage::tool(result));
                    }
                    state = LoopState::Generating;
                }
            }
        }

        // Cap reached: substitute a terminal answer instead of aborting
        let fallback = ChatMessage::assistant(
            "Analysis stopped after reaching the tool call limit; results above may be partial.",
        );
        transcript.push(fallback.clone());
        Ok(fallback)
    }

    /// Run one invocation against the current session, returning the new
    /// exchange as framework-agnostic messages. Assistant turns that only
    /// request tools are not surfaced; tool outputs become Tool messages and
    /// the terminal answer becomes the Ai message.
    pub async fn run(&mut self, messages: &[Message]) -> Result<Vec<Message>, AgentError> {
        if messages.is_empty() {
            return Err(AgentError::InvalidInput(
                "at least one message is required".to_string(),
            ));
        }

        let mut working = self
            .sessions
            .get(&self.session_id)
            .cloned()
            .unwrap_or_default();
        for message in messages {
            working.push(to_chat_message(message));
        }
        let start = working.len();

        self.run_tool_loop(&mut working).await?;

        let exchange: Vec<Message> = working[start..]
            .iter()
            .filter_map(to_shared_message)
            .collect();
        self.sessions.insert(self.session_id.clone(), working);

        Ok(exchange)
    }
}

fn fresh_session_id() -> String {
    // Short thread ids, same shape the checkpointer keys on
    uuid::Uuid::new_v4().to_string()[..8].to_string()
}

fn to_chat_message(message: &Message) -> ChatMessage {
    match message.message_type {
        MessageType::Human => ChatMessage::user(&message.content),
        MessageType::Ai => ChatMessage::assistant(&message.content),
        MessageType::System => ChatMessage::system(&message.content),
        MessageType::Tool => ChatMessage::tool(&message.content),
    }
}

/// Convert a wire message back into the shared envelope. Assistant messages
/// that only carry tool-call requests are internal to the loop and map to
/// nothing here, which keeps "most recent Ai message" scans accurate.
fn to_shared_message(message: &ChatMessage) -> Option<Message> {
    match message.role.as_str() {
        "assistant" => {
            if !message.pending_tool_calls().is_empty() && message.content.is_empty() {
                None
            } else {
                Some(Message::ai(&message.content))
            }
        }
        "tool" => Some(Message::tool(&message.content)),
        "user" => Some(Message::human(&message.content)),
        "system" => Some(Message::system(&message.content)),
        _ => None,
    }
}

#[async_trait]
impl Agent for SpecialistAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Vec<String> {
        self.capabilities.clone()
    }

    fn example_queries(&self) -> Vec<String> {
        self.example_queries.clone()
    }

    fn reset(&mut self) {
        self.session_id = fresh_session_id();
    }

    async fn invoke(&mut self, messages: &[Message]) -> Result<Vec<Message>, AgentError> {
        self.run(messages).await
    }

    fn message_history(&self) -> Vec<Message> {
        self.sessions
            .get(&self.session_id)
            .map(|transcript| {
                transcript
                    .iter()
                    .filter_map(to_shared_message)
                    .filter(|m| m.is_human() || m.is_ai())
                    .collect()
            })
            .unwrap_or_default()
    }
}
