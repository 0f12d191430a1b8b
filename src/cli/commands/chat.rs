//! Chat Command
//!
//! Talk to the legal assistant, one question or an interactive session.
//! The conversation lives in this process only.
//!
//! Usage:
//!   legaldraft chat "Qu'est-ce qu'une clause de non-concurrence ?"
//!   legaldraft chat            # interactive, /reset clears, /quit exits

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::ai::{AiMediator, Message};
use crate::api::chat::NO_RESPONSE;
use crate::cli::ui::Output;
use crate::types::{AiError, ErrorCategory, Result};

/// Conversation state kept by the terminal client
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    system_prompt: String,
    history: Vec<Message>,
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Send one turn; the exchange joins the history only when answered
    pub async fn send(&mut self, mediator: &AiMediator, message: &str) -> Result<Option<String>> {
        let reply = mediator
            .chat(message, &self.history, &self.system_prompt)
            .await?;

        if let Some(text) = &reply {
            self.history.push(Message::user(message));
            self.history.push(Message::assistant(text.as_str()));
        }
        Ok(reply)
    }
}

pub async fn run(
    mediator: &AiMediator,
    out: &Output,
    system_prompt: &str,
    message: Option<String>,
) -> Result<()> {
    let mut session = ChatSession::new(system_prompt);

    if let Some(message) = message {
        return match session.send(mediator, &message).await? {
            Some(text) => {
                out.text(&text);
                Ok(())
            }
            None => Err(AiError::with_provider(
                ErrorCategory::Unknown,
                NO_RESPONSE,
                mediator.provider_name(),
            )
            .into()),
        };
    }

    out.info("Assistant juridique prêt. /reset pour effacer l'historique, /quit pour quitter.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                out.success("Historique effacé");
                continue;
            }
            _ => {}
        }

        match session.send(mediator, line).await {
            Ok(Some(text)) => out.text(&format!("\n{}\n", text)),
            Ok(None) => out.warning(NO_RESPONSE),
            Err(e) => out.error(&e.to_string()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::RecordingProvider;
    use crate::ai::{MediatorSettings, Role};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_session_accumulates_history() {
        let provider = Arc::new(RecordingProvider::replying("Réponse"));
        let mediator = AiMediator::new(provider.clone(), MediatorSettings::default());
        let mut session = ChatSession::new("S");

        session.send(&mediator, "A").await.unwrap();
        session.send(&mediator, "C").await.unwrap();

        assert_eq!(session.history().len(), 4);
        let roles: Vec<Role> = provider.last_request().messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );

        session.reset();
        session.send(&mediator, "D").await.unwrap();
        assert_eq!(provider.last_request().messages.len(), 2);
    }

    #[tokio::test]
    async fn test_unanswered_turn_is_not_recorded() {
        let provider = Arc::new(RecordingProvider::empty());
        let mediator = AiMediator::new(provider, MediatorSettings::default());
        let mut session = ChatSession::new("");

        assert_eq!(session.send(&mediator, "A").await.unwrap(), None);
        assert!(session.history().is_empty());
    }
}
