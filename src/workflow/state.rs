// Shared workflow state threaded through every orchestration step

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Which specialist(s) the classifier routed a query to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteTarget {
    #[serde(rename = "supply_chain_agent")]
    SupplyChain,
    #[serde(rename = "financial_agent")]
    Financial,
    #[serde(rename = "both_agents")]
    Both,
}

impl RouteTarget {
    pub fn as_str(&self) -> &str {
        match self {
            RouteTarget::SupplyChain => "supply_chain_agent",
            RouteTarget::Financial => "financial_agent",
            RouteTarget::Both => "both_agents",
        }
    }

    /// Parse a classifier answer; anything unrecognized maps to the
    /// supply chain default
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "financial_agent" => RouteTarget::Financial,
            "both_agents" => RouteTarget::Both,
            _ => RouteTarget::SupplyChain,
        }
    }
}

/// The classifier's decision, consumed immediately by the router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub primary_agent: RouteTarget,
    pub reasoning: String,
}

/// Routing preview returned to the UI without executing any specialist
#[derive(Debug, Clone, Serialize)]
pub struct RoutePreview {
    pub primary_agent: String,
    pub requires_collaboration: bool,
    pub execution_order: Vec<String>,
}

impl RoutePreview {
    pub fn from_target(target: RouteTarget) -> Self {
        let execution_order = match target {
            RouteTarget::Both => vec!["supply_chain".to_string(), "financial".to_string()],
            RouteTarget::SupplyChain => vec!["supply_chain".to_string()],
            RouteTarget::Financial => vec!["financial".to_string()],
        };

        Self {
            primary_agent: target.as_str().to_string(),
            requires_collaboration: target == RouteTarget::Both,
            execution_order,
        }
    }
}

/// Mutable record owned by exactly one in-flight graph execution.
///
/// `messages` is append-only; the scalar response fields are each written
/// once by their producing step and read by the combination step. The
/// explicit `*_result` fields are written directly by the specialist steps
/// so downstream steps never have to infer results from message positions.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub messages: Vec<Message>,
    pub next_agent: Option<RouteTarget>,
    pub supply_chain_result: Option<String>,
    pub financial_result: Option<String>,
    pub english_response: Option<String>,
    pub spanish_response: Option<String>,
    pub hindi_response: Option<String>,
}

impl WorkflowState {
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::human(query)],
            ..Self::default()
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    /// Most recent message with non-empty content, scanning in reverse
    pub fn latest_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| !m.content.is_empty())
            .map(|m| m.content.as_str())
    }

    /// Most recent AI response, scanning in reverse
    pub fn latest_ai_response(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_ai())
            .map(|m| m.content.as_str())
    }

    /// First human-authored message, i.e. the original user query
    pub fn first_human_query(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.is_human())
            .map(|m| m.content.as_str())
    }

    pub fn requires_collaboration(&self) -> bool {
        self.next_agent == Some(RouteTarget::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_remaps_unknown() {
        assert_eq!(
            RouteTarget::parse_or_default("financial_agent"),
            RouteTarget::Financial
        );
        assert_eq!(RouteTarget::parse_or_default("both_agents"), RouteTarget::Both);
        assert_eq!(
            RouteTarget::parse_or_default("planetary_agent"),
            RouteTarget::SupplyChain
        );
        assert_eq!(RouteTarget::parse_or_default(""), RouteTarget::SupplyChain);
    }

    #[test]
    fn test_route_preview_collaboration_order() {
        let preview = RoutePreview::from_target(RouteTarget::Both);
        assert!(preview.requires_collaboration);
        assert_eq!(preview.execution_order, vec!["supply_chain", "financial"]);

        let preview = RoutePreview::from_target(RouteTarget::Financial);
        assert!(!preview.requires_collaboration);
        assert_eq!(preview.execution_order, vec!["financial"]);
    }

    #[test]
    fn test_latest_scans_reverse() {
        let mut state = WorkflowState::from_query("first");
        state.push(Message::ai("answer one"));
        state.push(Message::tool("tool output"));
        state.push(Message::ai("answer two"));

        assert_eq!(state.latest_content(), Some("answer two"));
        assert_eq!(state.latest_ai_response(), Some("answer two"));
        assert_eq!(state.first_human_query(), Some("first"));
    }

    #[test]
    fn test_latest_content_skips_empty() {
        let mut state = WorkflowState::from_query("query");
        state.push(Message::ai(""));
        assert_eq!(state.latest_content(), Some("query"));
    }
}
