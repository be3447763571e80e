// Planner agent - exposes routing classification through the agent contract

use super::{Agent, AgentError};
use crate::llm::{ChatMessage, ChatOptions, LanguageModel};
use crate::message::Message;
use crate::workflow::classifier::classification_prompt;
use async_trait::async_trait;
use std::sync::Arc;

/// Decides which specialist(s) a query should be routed to. The workflow's
/// intent classifier uses the same prompt; this wrapper exists so the UI can
/// list and invoke the planner like any other agent.
pub struct PlannerAgent {
    llm: Arc<dyn LanguageModel>,
    history: Vec<Message>,
}

impl PlannerAgent {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            history: Vec::new(),
        }
    }
}

#[async_trait]
impl Agent for PlannerAgent {
    fn name(&self) -> &str {
        "Planner Agent"
    }

    fn capabilities(&self) -> Vec<String> {
        vec!["Decides which sub-agent/s to be called.".to_string()]
    }

    fn example_queries(&self) -> Vec<String> {
        vec!["What agent should be called for questions related to supply chain?".to_string()]
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    async fn invoke(&mut self, messages: &[Message]) -> Result<Vec<Message>, AgentError> {
        let [message] = messages else {
            return Err(AgentError::InvalidInput(
                "planner expects exactly one human message".to_string(),
            ));
        };
        if !message.is_human() {
            return Err(AgentError::InvalidInput(
                "planner expects a human message".to_string(),
            ));
        }

        self.history.push(message.clone());

        let prompt = classification_prompt(&message.content);
        let response = self
            .llm
            .chat(
                &[ChatMessage::user(prompt)],
                &[],
                &ChatOptions::deterministic_json(),
            )
            .await?;

        let reply = Message::ai(&response.content);
        self.history.push(reply.clone());
        Ok(vec![reply])
    }

    fn message_history(&self) -> Vec<Message> {
        self.history.clone()
    }
}
