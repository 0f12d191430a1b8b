//! Conversation messages.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Build the outgoing sequence `[system?, ...history, user:message]`
///
/// The system message is omitted when `system_prompt` is empty. History is
/// forwarded as given; the caller owns conversation memory.
pub fn build_conversation(message: &str, history: &[Message], system_prompt: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);

    if !system_prompt.is_empty() {
        messages.push(Message::system(system_prompt));
    }
    messages.extend(history.iter().cloned());
    messages.push(Message::user(message));

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_order() {
        let history = vec![Message::user("A"), Message::assistant("B")];
        let messages = build_conversation("C", &history, "S");

        assert_eq!(
            messages,
            vec![
                Message::system("S"),
                Message::user("A"),
                Message::assistant("B"),
                Message::user("C"),
            ]
        );
    }

    #[test]
    fn test_empty_system_prompt_is_omitted() {
        let messages = build_conversation("Bonjour", &[], "");
        assert_eq!(messages, vec![Message::user("Bonjour")]);
    }

    #[test]
    fn test_message_wire_format() {
        let json = serde_json::to_value(Message::assistant("ok")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "ok"}));

        let parsed: Message = serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(parsed, Message::user("hi"));
        assert!(serde_json::from_str::<Message>(r#"{"role":"tool","content":"x"}"#).is_err());
    }
}
