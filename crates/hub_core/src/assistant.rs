use std::sync::Arc;

use info_service::InformationService;
use shared::{
    domain::{ChatMessage, Language},
    i18n::{MessageKey, Translations},
};
use tracing::warn;

use crate::prompts;

/// Linear preparedness chat: each user turn sends the whole transcript and
/// appends exactly one assistant reply.
pub struct AssistantSession {
    service: Arc<dyn InformationService>,
    language: Language,
    history: Vec<ChatMessage>,
}

impl AssistantSession {
    pub fn new(service: Arc<dyn InformationService>, language: Language) -> Self {
        let greeting = Translations::for_language(language).text(MessageKey::AssistantGreeting);
        Self {
            service,
            language,
            history: vec![ChatMessage::assistant(greeting)],
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Returns the reply, or `None` when the input is blank. Service failures
    /// become an apology in the transcript rather than an error.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.history.push(ChatMessage::user(input));

        let reply = match self.service.generate(prompts::assistant(&self.history)).await {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!("assistant: reply failed err={err}");
                Translations::for_language(self.language)
                    .text(MessageKey::AssistantFailure)
                    .to_string()
            }
        };
        self.history.push(ChatMessage::assistant(reply));
        self.history.last()
    }
}
