// Intent classification - decides which specialist(s) handle a query

use super::state::{RouteTarget, RoutingDecision};
use crate::llm::{ChatMessage, ChatOptions, LanguageModel};
use crate::message::Message;

pub(crate) fn classification_prompt(user_query: &str) -> String {
    format!(
        "Analyze this user query and classify which agent(s) should handle it.\n\n\
         User Query: \"{user_query}\"\n\n\
         Available Agents:\n\
         - supply_chain_agent: Handles supply chain management, risk assessment, supplier compliance, \
         logistics, operational analysis. This agent can answer questions about everything that impacts \
         supply chains including but not limited to weather and news.\n\
         - financial_agent: Handles cost analysis, financial risk, ROI calculations, budget planning, TCO analysis\n\
         - both_agents: Requires collaboration between both agents\n\n\
         Examples:\n\
         - \"Check supplier compliance\" -> supply_chain_agent\n\
         - \"Calculate TCO\" -> financial_agent\n\
         - \"Should we switch suppliers?\" -> both_agents\n\n\
         If the query does not fit into any of three agents, respond with supply_chain_agent by default.\n\n\
         Respond with ONLY a JSON object:\n\
         {{\n\
             \"primary_agent\": \"supply_chain_agent\" | \"financial_agent\" | \"both_agents\",\n\
             \"reasoning\": \"brief explanation of routing decision\"\n\
         }}"
    )
}

fn default_decision(reasoning: impl Into<String>) -> RoutingDecision {
    RoutingDecision {
        primary_agent: RouteTarget::SupplyChain,
        reasoning: reasoning.into(),
    }
}

/// Classify the latest user message. This step never fails: queries without
/// extractable content default to the supply chain agent without an LLM
/// call, and malformed model output is remapped to the same default.
pub async fn classify(llm: &dyn LanguageModel, messages: &[Message]) -> RoutingDecision {
    let user_query = messages
        .iter()
        .rev()
        .find(|m| !m.content.is_empty())
        .map(|m| m.content.as_str());

    let Some(user_query) = user_query else {
        return default_decision("No query content found; defaulting to supply chain agent.");
    };

    let prompt = classification_prompt(user_query);
    let response = match llm
        .chat(
            &[ChatMessage::user(prompt)],
            &[],
            &ChatOptions::deterministic_json(),
        )
        .await
    {
        Ok(response) => response,
        Err(e) => return default_decision(format!("Classification unavailable ({}); using default routing.", e)),
    };

    parse_decision(&response.content)
}

/// Parse the classifier's JSON answer, failing soft on anything malformed
fn parse_decision(content: &str) -> RoutingDecision {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(content) else {
        return default_decision("Could not parse routing decision; using default routing.");
    };

    let Some(primary_agent) = value["primary_agent"].as_str() else {
        return default_decision("Routing decision missing primary_agent; using default routing.");
    };

    RoutingDecision {
        primary_agent: RouteTarget::parse_or_default(primary_agent),
        reasoning: value["reasoning"].as_str().unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, ToolSpec};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingModel {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl CountingModel {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for CountingModel {
        async fn chat(
            &self,
            _messages: &[ChatMessage],
            _tools: &[ToolSpec],
            _options: &ChatOptions,
        ) -> Result<ChatMessage, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ChatMessage::assistant(self.reply))
        }
    }

    #[tokio::test]
    async fn test_empty_history_skips_llm() {
        let model = CountingModel::new("unused");
        let decision = classify(&model, &[]).await;
        assert_eq!(decision.primary_agent, RouteTarget::SupplyChain);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_content_skips_llm() {
        let model = CountingModel::new("unused");
        let decision = classify(&model, &[Message::human("")]).await;
        assert_eq!(decision.primary_agent, RouteTarget::SupplyChain);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_decision_parsed() {
        let model = CountingModel::new(
            r#"{"primary_agent": "both_agents", "reasoning": "needs ops and cost views"}"#,
        );
        let decision = classify(&model, &[Message::human("Should we switch suppliers?")]).await;
        assert_eq!(decision.primary_agent, RouteTarget::Both);
        assert_eq!(decision.reasoning, "needs ops and cost views");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_defaults() {
        let model = CountingModel::new("I think the supply chain agent should do it");
        let decision = classify(&model, &[Message::human("anything")]).await;
        assert_eq!(decision.primary_agent, RouteTarget::SupplyChain);
    }

    #[tokio::test]
    async fn test_unrecognized_agent_remapped() {
        let model =
            CountingModel::new(r#"{"primary_agent": "weather_agent", "reasoning": "?"}"#);
        let decision = classify(&model, &[Message::human("anything")]).await;
        assert_eq!(decision.primary_agent, RouteTarget::SupplyChain);
    }

    #[tokio::test]
    async fn test_missing_field_defaults() {
        let model = CountingModel::new(r#"{"reasoning": "no agent field"}"#);
        let decision = classify(&model, &[Message::human("anything")]).await;
        assert_eq!(decision.primary_agent, RouteTarget::SupplyChain);
    }

    #[tokio::test]
    async fn test_latest_message_wins() {
        let model = CountingModel::new(
            r#"{"primary_agent": "financial_agent", "reasoning": "cost"}"#,
        );
        let messages = vec![
            Message::human("old question"),
            Message::ai("old answer"),
            Message::human("What is the TCO for SUP001?"),
        ];
        let decision = classify(&model, &messages).await;
        assert_eq!(decision.primary_agent, RouteTarget::Financial);
    }
}
