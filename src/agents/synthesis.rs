// Synthesis agent - merges the two specialist analyses into one answer

use super::{Agent, AgentError};
use crate::llm::{ChatMessage, ChatOptions, LanguageModel};
use crate::message::Message;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces a coherent merged answer from the supply chain and financial
/// analyses. Never a plain concatenation.
pub struct SynthesisAgent {
    llm: Arc<dyn LanguageModel>,
    history: Vec<Message>,
}

impl SynthesisAgent {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            history: Vec::new(),
        }
    }

    fn synthesis_prompt(user_query: &str, supply_chain: &str, financial: &str) -> String {
        format!(
            "Synthesize a comprehensive response by combining insights from both specialized agents.\n\n\
             Original User Query: \"{user_query}\"\n\n\
             SUPPLY CHAIN AGENT ANALYSIS:\n{supply_chain}\n\n\
             FINANCIAL AGENT ANALYSIS:\n{financial}\n\n\
             Please provide a unified response that:\n\
             1. Directly answers the user's original query\n\
             2. Integrates insights from both agents seamlessly\n\
             3. Highlights any trade-offs between operational and financial considerations\n\
             4. Provides clear, actionable recommendations\n\
             5. Is well-structured and easy to understand\n\n\
             Do not simply concatenate the responses - create a cohesive synthesis that balances both perspectives."
        )
    }

    /// Merge the two analyses for the given query
    pub async fn synthesize(
        &mut self,
        user_query: &str,
        supply_chain: &str,
        financial: &str,
    ) -> Result<String, AgentError> {
        let prompt = Self::synthesis_prompt(user_query, supply_chain, financial);
        let response = self
            .llm
            .chat(
                &[ChatMessage::user(prompt)],
                &[],
                &ChatOptions::deterministic(),
            )
            .await?;

        self.history.push(Message::ai(&response.content));
        Ok(response.content)
    }
}

#[async_trait]
impl Agent for SynthesisAgent {
    fn name(&self) -> &str {
        "Response Synthesis Agent"
    }

    fn capabilities(&self) -> Vec<String> {
        vec!["Provides a coherent summary of supply chain and financial analysis.".to_string()]
    }

    fn example_queries(&self) -> Vec<String> {
        Vec::new()
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    /// Two messages: single-specialist run, pass the response through.
    /// Three messages: query + both analyses, synthesize.
    async fn invoke(&mut self, messages: &[Message]) -> Result<Vec<Message>, AgentError> {
        match messages {
            [_, response] => {
                self.history.push(response.clone());
                Ok(vec![response.clone()])
            }
            [query, supply_chain, financial] => {
                let merged = self
                    .synthesize(&query.content, &supply_chain.content, &financial.content)
                    .await?;
                Ok(vec![Message::ai(merged)])
            }
            _ => Err(AgentError::InvalidInput(
                "synthesis expects two or three messages".to_string(),
            )),
        }
    }

    fn message_history(&self) -> Vec<Message> {
        self.history.clone()
    }
}
