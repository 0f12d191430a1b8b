//! LLM Provider Abstraction
//!
//! Defines the `CompletionProvider` trait the mediator talks to. A provider
//! turns one [`ChatRequest`] into either a complete text or a lazy stream of
//! text fragments; it holds no conversation state between calls.
//!
//! ## Modules
//!
//! - `openai`: OpenAI-compatible Chat Completions client
//! - `sse`: `data:` frame decoding for streamed responses

mod openai;
pub mod sse;

pub use openai::OpenAiProvider;

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;

use super::message::Message;
use crate::config::AiConfig;
use crate::types::{DraftError, Result};

/// Lazy, single-pass sequence of text fragments
///
/// Dropping the stream releases the underlying connection. A transport
/// failure is yielded once as an `Err` item and ends the sequence.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Shared provider handle
pub type SharedProvider = Arc<dyn CompletionProvider>;

/// One chat-completion call, built fresh for every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Whole-request deadline; not part of the wire body
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: crate::constants::ai::DEFAULT_MAX_TOKENS,
            temperature: crate::constants::ai::DEFAULT_TEMPERATURE,
            stream: None,
            timeout: None,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}

/// Remote chat-completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one request/response exchange
    ///
    /// `Ok(None)` means the provider answered without any choice.
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>>;

    /// Open a streaming exchange
    ///
    /// Errors raised before the first byte (credentials, HTTP status) are
    /// returned here; later failures arrive as stream items.
    async fn stream(&self, request: ChatRequest) -> Result<FragmentStream>;

    /// Provider name for logging and error context
    fn name(&self) -> &str;

    /// Whether credentials are configured
    fn is_configured(&self) -> bool;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &AiConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::new(config)?)),
        _ => Err(DraftError::Config(format!(
            "Unknown provider: {}. Supported: openai",
            config.provider
        ))),
    }
}
