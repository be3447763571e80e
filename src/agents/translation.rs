// Translation agent - renders an English analysis in another language

use super::{Agent, AgentError};
use crate::llm::{ChatMessage, ChatOptions, LanguageModel};
use crate::message::Message;
use async_trait::async_trait;
use std::sync::Arc;

/// Target languages supported by the translation fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Spanish,
    Hindi,
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::Spanish => "Spanish",
            Language::Hindi => "Hindi",
        }
    }

    fn script_note(&self) -> &str {
        match self {
            Language::Spanish => "",
            Language::Hindi => "\nUse Devanagari script for the Hindi translation.",
        }
    }
}

/// Translates English responses into one target language
pub struct TranslationAgent {
    llm: Arc<dyn LanguageModel>,
    language: Language,
    history: Vec<Message>,
}

impl TranslationAgent {
    pub fn new(llm: Arc<dyn LanguageModel>, language: Language) -> Self {
        Self {
            llm,
            language,
            history: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn translation_prompt(&self, english_response: &str) -> String {
        format!(
            "Translate the following supply chain analysis response into {lang}.\n\
             Maintain the professional tone and technical accuracy.\n\
             Keep any technical terms and metrics in their original form where appropriate.{script}\n\n\
             English Response:\n{text}\n\n\
             Please provide only the {lang} translation, maintaining the same structure and formatting.",
            lang = self.language.as_str(),
            script = self.language.script_note(),
            text = english_response,
        )
    }

    /// Translate one English text, returning the translation
    pub async fn translate(&mut self, english_response: &str) -> Result<String, AgentError> {
        let prompt = ChatMessage::system(self.translation_prompt(english_response));
        self.history.push(Message::system(&prompt.content));

        let response = self
            .llm
            .chat(&[prompt], &[], &ChatOptions::deterministic())
            .await?;

        self.history.push(Message::ai(&response.content));
        Ok(response.content)
    }
}

#[async_trait]
impl Agent for TranslationAgent {
    fn name(&self) -> &str {
        "Translation Agent"
    }

    fn capabilities(&self) -> Vec<String> {
        vec![format!(
            "Accepts English messages and translates them to {}",
            self.language.as_str()
        )]
    }

    fn example_queries(&self) -> Vec<String> {
        vec![format!(
            "How do you say 'Good morning!' in {}?",
            self.language.as_str()
        )]
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    async fn invoke(&mut self, messages: &[Message]) -> Result<Vec<Message>, AgentError> {
        let [message] = messages else {
            return Err(AgentError::InvalidInput(
                "translation expects exactly one message".to_string(),
            ));
        };
        let translated = self.translate(&message.content).await?;
        Ok(vec![Message::ai(translated)])
    }

    fn message_history(&self) -> Vec<Message> {
        self.history.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, ToolSpec};

    struct FixedModel(String);

    #[async_trait]
    impl LanguageModel for FixedModel {
        async fn chat(
            &self,
            _messages: &[ChatMessage],
            _tools: &[ToolSpec],
            _options: &ChatOptions,
        ) -> Result<ChatMessage, LlmError> {
            Ok(ChatMessage::assistant(self.0.clone()))
        }
    }

    #[tokio::test]
    async fn test_translate_returns_model_output() {
        let mut agent = TranslationAgent::new(
            Arc::new(FixedModel("Hola mundo".to_string())),
            Language::Spanish,
        );
        let result = agent.translate("Hello world").await.unwrap();
        assert_eq!(result, "Hola mundo");
        assert_eq!(agent.message_history().len(), 2);
    }

    #[tokio::test]
    async fn test_same_input_same_stub_same_output() {
        let mut agent = TranslationAgent::new(
            Arc::new(FixedModel("नमस्ते".to_string())),
            Language::Hindi,
        );
        let first = agent.translate("Hello").await.unwrap();
        let second = agent.translate("Hello").await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hindi_prompt_requires_devanagari() {
        let agent = TranslationAgent::new(
            Arc::new(FixedModel(String::new())),
            Language::Hindi,
        );
        let prompt = agent.translation_prompt("text");
        assert!(prompt.contains("Devanagari"));
    }

    #[test]
    fn test_spanish_prompt_has_no_script_note() {
        let agent = TranslationAgent::new(
            Arc::new(FixedModel(String::new())),
            Language::Spanish,
        );
        assert!(!agent.translation_prompt("text").contains("Devanagari"));
    }
}
