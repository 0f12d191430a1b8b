//! AI Integration Layer
//!
//! Mediates between drafting callers and a remote chat-completion API.

pub mod mediator;
pub mod message;
pub mod prompt;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use mediator::{AiMediator, MediatorSettings};
pub use message::{Message, Role, build_conversation};
pub use prompt::ReformulationStyle;
pub use provider::{
    ChatRequest, CompletionProvider, FragmentStream, OpenAiProvider, SharedProvider,
    create_provider,
};
