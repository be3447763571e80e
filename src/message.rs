// Framework-agnostic message envelope shared across agents and the workflow

use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Human,
    Ai,
    System,
    Tool,
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Human => "human",
            MessageType::Ai => "ai",
            MessageType::System => "system",
            MessageType::Tool => "tool",
        }
    }
}

/// A single entry in a conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message_type: MessageType,
    pub content: String,
}

impl Message {
    pub fn new(message_type: MessageType, content: impl Into<String>) -> Self {
        Self {
            message_type,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(MessageType::Human, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(MessageType::Ai, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageType::System, content)
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(MessageType::Tool, content)
    }

    pub fn is_ai(&self) -> bool {
        self.message_type == MessageType::Ai
    }

    pub fn is_human(&self) -> bool {
        self.message_type == MessageType::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_tag_correctly() {
        assert_eq!(Message::human("hi").message_type, MessageType::Human);
        assert_eq!(Message::ai("ok").message_type, MessageType::Ai);
        assert_eq!(Message::system("ctx").message_type, MessageType::System);
        assert_eq!(Message::tool("report").message_type, MessageType::Tool);
    }

    #[test]
    fn test_role_predicates() {
        assert!(Message::ai("x").is_ai());
        assert!(!Message::tool("x").is_ai());
        assert!(Message::human("x").is_human());
    }
}
