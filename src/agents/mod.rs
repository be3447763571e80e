// Agent implementations behind the shared identity contract

mod planner;
mod specialist;
mod synthesis;
mod translation;

pub use planner::PlannerAgent;
pub use specialist::SpecialistAgent;
pub use synthesis::SynthesisAgent;
pub use translation::{Language, TranslationAgent};

use crate::llm::LlmError;
use crate::message::Message;
use async_trait::async_trait;

/// The uniform contract every agent variant exposes, regardless of whether
/// its history is checkpoint-backed or a plain list. The chat UI and the
/// orchestrator treat all agents through this seam.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Name of the agent
    fn name(&self) -> &str;

    /// The list of capabilities this agent supports
    fn capabilities(&self) -> Vec<String>;

    /// Suggested example queries
    fn example_queries(&self) -> Vec<String>;

    /// Reset the agent's conversation state
    fn reset(&mut self);

    /// Process messages and return the agent's response messages
    async fn invoke(&mut self, messages: &[Message]) -> Result<Vec<Message>, AgentError>;

    /// Current conversation history in chronological order
    fn message_history(&self) -> Vec<Message>;
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
