// Multi-agent orchestrator - classifies intent, routes to specialists,
// synthesizes, and fans out to translations before the final combination

use super::classifier;
use super::nodes;
use super::state::{RoutePreview, RouteTarget, WorkflowState};
use crate::agents::{Language, SpecialistAgent, SynthesisAgent, TranslationAgent};
use crate::llm::LanguageModel;
use crate::message::Message;
use std::sync::Arc;

/// Drives one query through the workflow graph:
///
/// ```text
/// START -> intent_classifier
///   intent_classifier -(supply_chain | both)-> supply_chain_agent
///   intent_classifier -(financial)-> financial_agent
///   supply_chain_agent -(both)-> financial_agent, else -> synthesize_followup
///   financial_agent -> synthesize_followup
///   synthesize_followup -> {spanish_translation, hindi_translation}
///   {spanish_translation, hindi_translation} -> multilingual_combination -> END
/// ```
///
/// Single pass per query, no cycles; the only loops live inside each
/// specialist's tool loop. The translation branches run concurrently and
/// are joined before the combination step.
pub struct Orchestrator {
    llm: Arc<dyn LanguageModel>,
    supply_chain: SpecialistAgent,
    financial: SpecialistAgent,
    synthesis: SynthesisAgent,
    spanish: TranslationAgent,
    hindi: TranslationAgent,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            supply_chain: SpecialistAgent::supply_chain(llm.clone()),
            financial: SpecialistAgent::financial(llm.clone()),
            synthesis: SynthesisAgent::new(llm.clone()),
            spanish: TranslationAgent::new(llm.clone(), Language::Spanish),
            hindi: TranslationAgent::new(llm.clone(), Language::Hindi),
            llm,
        }
    }

    /// Process a query end to end. Never fails: internal step failures
    /// degrade to error text inside the response, and an empty result
    /// yields the literal fallback string.
    pub async fn process_query(&mut self, user_query: &str) -> String {
        let state = WorkflowState::from_query(user_query);
        let result = self.run(state).await;

        match result.messages.last() {
            Some(message) => message.content.clone(),
            None => "No response generated".to_string(),
        }
    }

    /// Run classification only, for UI routing previews
    pub async fn get_routing_decision(&self, user_query: &str) -> RoutePreview {
        let messages = [Message::human(user_query)];
        let decision = classifier::classify(self.llm.as_ref(), &messages).await;
        RoutePreview::from_target(decision.primary_agent)
    }

    /// Drive the full graph over the given state
    pub async fn run(&mut self, mut state: WorkflowState) -> WorkflowState {
        // intent_classifier
        let decision = classifier::classify(self.llm.as_ref(), &state.messages).await;
        println!("🎯 Routing decision: {}", decision.primary_agent.as_str());
        println!("💭 Reasoning: {}", decision.reasoning);
        state.next_agent = Some(decision.primary_agent);

        // conditional routing; collaboration starts with supply chain
        match decision.primary_agent {
            RouteTarget::SupplyChain => {
                self.run_supply_chain(&mut state).await;
            }
            RouteTarget::Financial => {
                self.run_financial(&mut state).await;
            }
            RouteTarget::Both => {
                self.run_supply_chain(&mut state).await;
                self.run_financial(&mut state).await;
            }
        }

        // synthesize_followup: no-op unless both specialists ran
        if state.requires_collaboration() {
            let inputs = nodes::synthesis_inputs(&state);
            let merged = match self
                .synthesis
                .synthesize(&inputs.user_query, &inputs.supply_chain, &inputs.financial)
                .await
            {
                Ok(merged) => merged,
                Err(e) => format!("Error synthesizing specialist analyses: {}", e),
            };
            state.english_response = Some(merged.clone());
            state.push(Message::ai(merged));
        }

        // translation fan-out; join barrier before combination
        let source = nodes::translation_source(&state);
        let (spanish_response, hindi_response) = tokio::join!(
            nodes::run_translation(&mut self.spanish, source.as_deref()),
            nodes::run_translation(&mut self.hindi, source.as_deref()),
        );
        state.spanish_response = Some(spanish_response);
        state.hindi_response = Some(hindi_response);

        // multilingual_combination
        let document = nodes::multilingual_combination(&state);
        state.push(Message::ai(document));

        state
    }

    async fn run_supply_chain(&mut self, state: &mut WorkflowState) {
        let input = state.messages.clone();
        match self.supply_chain.run(&input).await {
            Ok(exchange) => {
                let result = exchange
                    .iter()
                    .rev()
                    .find(|m| m.is_ai())
                    .map(|m| m.content.clone());
                state.extend(exchange);
                state.supply_chain_result = result;
            }
            Err(e) => {
                let notice = format!("Supply chain analysis unavailable: {}", e);
                state.supply_chain_result = Some(notice.clone());
                state.push(Message::ai(notice));
            }
        }
    }

    async fn run_financial(&mut self, state: &mut WorkflowState) {
        let input = nodes::financial_input(state);
        match self.financial.run(&input).await {
            Ok(exchange) => {
                let result = exchange
                    .iter()
                    .rev()
                    .find(|m| m.is_ai())
                    .map(|m| m.content.clone());
                state.extend(exchange);
                state.financial_result = result;
            }
            Err(e) => {
                let notice = format!("Financial analysis unavailable: {}", e);
                state.financial_result = Some(notice.clone());
                state.push(Message::ai(notice));
            }
        }
    }
}
