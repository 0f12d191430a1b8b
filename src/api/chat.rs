//! `POST /chat/send` contract.
//!
//! Request: `{"message": "...", "history": [{"role", "content"}, ...]}`, both
//! fields optional. Reply: `{"response", "success": true}` with 200, or
//! `{"error", "success": false}` with 400/500.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::{AiMediator, Message};
use crate::types::Result;

pub const EMPTY_MESSAGE: &str = "Message vide";
pub const NO_RESPONSE: &str = "L'IA n'a pas pu générer de réponse";
pub const INVALID_REQUEST: &str = "Requête invalide";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatRequestBody {
    pub message: String,
    pub history: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatResponseBody {
    Success { response: String, success: bool },
    Failure { error: String, success: bool },
}

impl ChatResponseBody {
    pub fn success(response: String) -> Self {
        Self::Success {
            response,
            success: true,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            success: false,
        }
    }
}

/// Status code and JSON body, ready for any HTTP framework
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub status: u16,
    pub body: ChatResponseBody,
}

impl ChatReply {
    fn ok(response: String) -> Self {
        Self {
            status: 200,
            body: ChatResponseBody::success(response),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ChatResponseBody::failure(message),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.body)?)
    }
}

/// Run one chat turn for a decoded request body
pub async fn handle_chat(mediator: &AiMediator, system_prompt: &str, body: ChatRequestBody) -> ChatReply {
    if body.message.trim().is_empty() {
        return ChatReply::error(400, EMPTY_MESSAGE);
    }

    debug!("Chat request with {} history messages", body.history.len());
    match mediator.chat(&body.message, &body.history, system_prompt).await {
        Ok(Some(response)) => ChatReply::ok(response),
        Ok(None) => ChatReply::error(500, NO_RESPONSE),
        Err(e) => {
            warn!("Chat failed: {}", e);
            ChatReply::error(500, e.to_string())
        }
    }
}

/// Same as [`handle_chat`], starting from the raw request payload
pub async fn handle_chat_json(mediator: &AiMediator, system_prompt: &str, payload: &str) -> ChatReply {
    match serde_json::from_str::<ChatRequestBody>(payload) {
        Ok(body) => handle_chat(mediator, system_prompt, body).await,
        Err(e) => {
            debug!("Rejected chat payload: {}", e);
            ChatReply::error(400, INVALID_REQUEST)
        }
    }
}
