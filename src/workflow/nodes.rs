// Workflow step implementations: context injection, synthesis inputs,
// translation fan-out, and the multilingual fan-in

use super::state::WorkflowState;
use crate::agents::TranslationAgent;
use crate::message::Message;

/// Substituted for a missing or failed translation so the combination step
/// always has a value for every language section
pub const NO_RESPONSE_SENTINEL: &str = "Error: No response to translate";

/// Build the message list the financial specialist sees. In collaborative
/// mode the supply chain analysis is injected as a system message into a
/// copy of the list; the shared state's messages are never mutated here.
pub fn financial_input(state: &WorkflowState) -> Vec<Message> {
    let mut messages = state.messages.clone();

    if !state.requires_collaboration() {
        return messages;
    }

    // Prefer the explicit result field; fall back to scanning for the most
    // recent message that mentions supply chain at all.
    let supply_chain_result = state.supply_chain_result.clone().or_else(|| {
        state
            .messages
            .iter()
            .rev()
            .find(|m| m.content.to_lowercase().contains("supply chain"))
            .map(|m| m.content.clone())
    });

    if let Some(context) = supply_chain_result {
        messages.push(Message::system(format!(
            "Context from Supply Chain Analysis:\n{context}\n\n\
             Please provide financial analysis that complements the supply chain analysis above.\n\
             Focus on cost implications, ROI calculations, and financial risks related to the supply chain recommendations.\n\
             Consider the operational factors mentioned in the supply chain analysis."
        )));
    }

    messages
}

/// Inputs for the synthesis step, extracted from named result fields with a
/// guarded positional fallback for histories built outside the orchestrator
pub struct SynthesisInputs {
    pub user_query: String,
    pub supply_chain: String,
    pub financial: String,
}

pub fn synthesis_inputs(state: &WorkflowState) -> SynthesisInputs {
    let user_query = state.first_human_query().unwrap_or_default().to_string();

    let ai_messages: Vec<&str> = state
        .messages
        .iter()
        .filter(|m| m.is_ai())
        .map(|m| m.content.as_str())
        .collect();

    let supply_chain = state.supply_chain_result.clone().unwrap_or_else(|| {
        // Second to last AI message when two exist, else whatever is there
        match ai_messages.len() {
            0 => String::new(),
            1 => ai_messages[0].to_string(),
            n => ai_messages[n - 2].to_string(),
        }
    });

    let financial = state
        .financial_result
        .clone()
        .unwrap_or_else(|| ai_messages.last().copied().unwrap_or_default().to_string());

    SynthesisInputs {
        user_query,
        supply_chain,
        financial,
    }
}

/// Source text for the translation fan-out: the synthesized English
/// response when set, else the most recent AI response
pub fn translation_source(state: &WorkflowState) -> Option<String> {
    state
        .english_response
        .clone()
        .filter(|text| !text.is_empty())
        .or_else(|| state.latest_ai_response().map(|text| text.to_string()))
        .filter(|text| !text.is_empty())
}

/// Run one translation branch. Missing source text and translation failures
/// both degrade to the sentinel so the fan-in always observes a value.
pub async fn run_translation(agent: &mut TranslationAgent, source: Option<&str>) -> String {
    let Some(source) = source else {
        return NO_RESPONSE_SENTINEL.to_string();
    };

    match agent.translate(source).await {
        Ok(translated) => translated,
        Err(e) => {
            eprintln!("{} translation failed: {}", agent.language().as_str(), e);
            NO_RESPONSE_SENTINEL.to_string()
        }
    }
}

/// Fan-in: merge the three language responses into one document. A pure
/// merge that unconditionally succeeds with whatever values are present.
pub fn multilingual_combination(state: &WorkflowState) -> String {
    let english = state
        .english_response
        .clone()
        .filter(|text| !text.is_empty())
        .or_else(|| state.latest_ai_response().map(|text| text.to_string()))
        .unwrap_or_default();
    let spanish = state.spanish_response.clone().unwrap_or_default();
    let hindi = state.hindi_response.clone().unwrap_or_default();

    format!(
        "## 🌍 Supply Chain Analysis - Multilingual Response\n\n\
         ### 🇺🇸 English Response:\n{english}\n\n\
         ---\n\n\
         ### 🇪🇸 Respuesta en Español:\n{spanish}\n\n\
         ---\n\n\
         ### 🇮🇳 हिंदी में उत्तर:\n{hindi}\n\n\
         ---\n\n\
         *This analysis has been provided in three languages to ensure accessibility across different markets and stakeholders.*"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::state::RouteTarget;

    #[test]
    fn test_financial_input_injects_context_when_collaborative() {
        let mut state = WorkflowState::from_query("Should we switch suppliers?");
        state.next_agent = Some(RouteTarget::Both);
        state.push(Message::ai("Our supply chain in Mexico is strained"));

        let messages = financial_input(&state);
        let injected = messages.last().unwrap();
        assert_eq!(injected.message_type, crate::message::MessageType::System);
        assert!(injected
            .content
            .contains("Our supply chain in Mexico is strained"));
        // Shared state untouched
        assert_eq!(state.messages.len(), 2);
    }

    #[test]
    fn test_financial_input_prefers_named_field() {
        let mut state = WorkflowState::from_query("q");
        state.next_agent = Some(RouteTarget::Both);
        state.supply_chain_result = Some("explicit analysis".to_string());
        state.push(Message::ai("mentions supply chain somewhere"));

        let messages = financial_input(&state);
        assert!(messages.last().unwrap().content.contains("explicit analysis"));
    }

    #[test]
    fn test_financial_input_no_injection_single_agent() {
        let mut state = WorkflowState::from_query("What is the TCO?");
        state.next_agent = Some(RouteTarget::Financial);
        state.push(Message::ai("supply chain mention that must not trigger"));

        let messages = financial_input(&state);
        assert_eq!(messages.len(), state.messages.len());
        assert!(messages
            .iter()
            .all(|m| m.message_type != crate::message::MessageType::System));
    }

    #[test]
    fn test_financial_input_no_match_no_injection() {
        let mut state = WorkflowState::from_query("Should we switch?");
        state.next_agent = Some(RouteTarget::Both);
        state.push(Message::ai("logistics answer without the phrase"));

        let messages = financial_input(&state);
        assert_eq!(messages.len(), state.messages.len());
    }

    #[test]
    fn test_synthesis_inputs_prefer_named_fields() {
        let mut state = WorkflowState::from_query("the query");
        state.supply_chain_result = Some("sc result".to_string());
        state.financial_result = Some("fin result".to_string());
        state.push(Message::ai("unrelated ai message"));

        let inputs = synthesis_inputs(&state);
        assert_eq!(inputs.user_query, "the query");
        assert_eq!(inputs.supply_chain, "sc result");
        assert_eq!(inputs.financial, "fin result");
    }

    #[test]
    fn test_synthesis_inputs_positional_fallback() {
        let mut state = WorkflowState::from_query("the query");
        state.push(Message::ai("sc analysis"));
        state.push(Message::tool("tool noise"));
        state.push(Message::ai("fin analysis"));

        let inputs = synthesis_inputs(&state);
        assert_eq!(inputs.supply_chain, "sc analysis");
        assert_eq!(inputs.financial, "fin analysis");
    }

    #[test]
    fn test_synthesis_inputs_guarded_when_short() {
        let mut state = WorkflowState::from_query("the query");
        state.push(Message::ai("only one analysis"));

        let inputs = synthesis_inputs(&state);
        assert_eq!(inputs.supply_chain, "only one analysis");
        assert_eq!(inputs.financial, "only one analysis");

        let empty = synthesis_inputs(&WorkflowState::from_query("q"));
        assert_eq!(empty.supply_chain, "");
        assert_eq!(empty.financial, "");
    }

    #[test]
    fn test_translation_source_preference_order() {
        let mut state = WorkflowState::from_query("q");
        assert_eq!(translation_source(&state), None);

        state.push(Message::ai("latest ai answer"));
        assert_eq!(translation_source(&state).as_deref(), Some("latest ai answer"));

        state.english_response = Some("synthesized".to_string());
        assert_eq!(translation_source(&state).as_deref(), Some("synthesized"));
    }

    #[test]
    fn test_combination_always_has_three_sections() {
        let mut state = WorkflowState::from_query("q");
        state.english_response = Some("English body".to_string());
        state.spanish_response = Some(NO_RESPONSE_SENTINEL.to_string());
        state.hindi_response = Some(NO_RESPONSE_SENTINEL.to_string());

        let doc = multilingual_combination(&state);
        assert_eq!(doc.matches("### ").count(), 3);
        let english_pos = doc.find("English Response").unwrap();
        let spanish_pos = doc.find("Respuesta en Español").unwrap();
        let hindi_pos = doc.find("हिंदी में उत्तर").unwrap();
        assert!(english_pos < spanish_pos && spanish_pos < hindi_pos);
        assert!(doc.contains(NO_RESPONSE_SENTINEL));
    }

    #[test]
    fn test_combination_english_fallback_scan() {
        let mut state = WorkflowState::from_query("q");
        state.push(Message::ai("the only answer"));
        state.spanish_response = Some("respuesta".to_string());
        state.hindi_response = Some("उत्तर".to_string());

        let doc = multilingual_combination(&state);
        assert!(doc.contains("the only answer"));
    }
}
