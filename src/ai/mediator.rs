//! AI Mediator
//!
//! Builds chat requests from prompts, history and system instructions and
//! hands them to a [`CompletionProvider`](super::provider::CompletionProvider). The drafting helpers are prompt
//! templates over [`AiMediator::generate`].
//!
//! The mediator is stateless: history is supplied by the caller on every
//! call and nothing is retained between calls.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::message::{Message, build_conversation};
use super::prompt::{self, ReformulationStyle};
use super::provider::{ChatRequest, FragmentStream, SharedProvider, create_provider};
use crate::config::AiConfig;
use crate::constants::{ai as ai_defaults, budget};
use crate::types::Result;

/// Per-call defaults applied by the mediator
#[derive(Debug, Clone, PartialEq)]
pub struct MediatorSettings {
    pub model: String,
    pub temperature: f32,
    /// Output cap for chat turns and `generate` without an explicit budget
    pub max_tokens: u32,
    pub generate_timeout: Duration,
    pub chat_timeout: Duration,
}

impl Default for MediatorSettings {
    fn default() -> Self {
        Self {
            model: ai_defaults::DEFAULT_MODEL.to_string(),
            temperature: ai_defaults::DEFAULT_TEMPERATURE,
            max_tokens: ai_defaults::DEFAULT_MAX_TOKENS,
            generate_timeout: Duration::from_secs(ai_defaults::GENERATE_TIMEOUT_SECS),
            chat_timeout: Duration::from_secs(ai_defaults::CHAT_TIMEOUT_SECS),
        }
    }
}

impl From<&AiConfig> for MediatorSettings {
    fn from(config: &AiConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            generate_timeout: Duration::from_secs(config.timeout_secs),
            chat_timeout: Duration::from_secs(config.chat_timeout_secs),
        }
    }
}

#[derive(Clone)]
pub struct AiMediator {
    provider: SharedProvider,
    settings: MediatorSettings,
}

impl std::fmt::Debug for AiMediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiMediator")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl AiMediator {
    pub fn new(provider: SharedProvider, settings: MediatorSettings) -> Self {
        Self { provider, settings }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self> {
        Ok(Self::new(create_provider(config)?, MediatorSettings::from(config)))
    }

    /// Whether an API key is configured
    pub fn is_available(&self) -> bool {
        self.provider.is_configured()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &MediatorSettings {
        &self.settings
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// One conversational turn: `[system?, ...history, user:message]`
    pub async fn chat(
        &self,
        message: &str,
        history: &[Message],
        system_prompt: &str,
    ) -> Result<Option<String>> {
        let messages = build_conversation(message, history, system_prompt);
        debug!("Chat turn with {} prior messages", history.len());

        let request = ChatRequest::new(self.settings.model.as_str(), messages)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .timeout(self.settings.chat_timeout);
        self.complete("chat", request).await
    }

    /// Single-prompt generation
    ///
    /// `model` and `max_tokens` fall back to the configured defaults.
    pub async fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<Option<String>> {
        let request = self
            .single_prompt(prompt, model, max_tokens)
            .timeout(self.settings.generate_timeout);
        self.complete("generate", request).await
    }

    /// Streamed single-prompt generation
    ///
    /// The returned stream is lazy: nothing is read until it is polled, and
    /// dropping it closes the connection.
    pub async fn generate_stream(
        &self,
        prompt: &str,
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<FragmentStream> {
        let request = self.single_prompt(prompt, model, max_tokens);
        info!(
            "Opening stream via {} (model: {})",
            self.provider.name(),
            request.model
        );
        self.provider.stream(request).await
    }

    fn single_prompt(&self, prompt: &str, model: Option<&str>, max_tokens: Option<u32>) -> ChatRequest {
        ChatRequest::new(
            model.unwrap_or(&self.settings.model),
            vec![Message::user(prompt)],
        )
        .max_tokens(max_tokens.unwrap_or(self.settings.max_tokens))
        .temperature(self.settings.temperature)
    }

    async fn complete(&self, operation: &str, request: ChatRequest) -> Result<Option<String>> {
        let start = Instant::now();
        let model = request.model.clone();

        let text = self.provider.complete(request).await?;

        info!(
            "{} via {} (model: {}) finished in {:.1}s{}",
            operation,
            self.provider.name(),
            model,
            start.elapsed().as_secs_f64(),
            if text.is_none() { ", no choice returned" } else { "" }
        );
        Ok(text)
    }

    // =========================================================================
    // Drafting helpers
    // =========================================================================

    /// Rewrite a document in the given tone (default `formel`)
    pub async fn improve_document(&self, content: &str, tone: Option<&str>) -> Result<Option<String>> {
        let prompt = prompt::improve_document(content, tone.unwrap_or(prompt::DEFAULT_TONE));
        self.generate(&prompt, None, Some(budget::IMPROVE_DOCUMENT)).await
    }

    /// Draft a clause of `clause_type`, with context pairs listed in order
    pub async fn generate_clause<I, K, V>(&self, clause_type: &str, context: I) -> Result<Option<String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let prompt = prompt::generate_clause(clause_type, context);
        self.generate(&prompt, None, Some(budget::GENERATE_CLAUSE)).await
    }

    pub async fn reformulate(&self, content: &str, style: ReformulationStyle) -> Result<Option<String>> {
        let prompt = prompt::reformulate(content, style);
        self.generate(&prompt, None, Some(budget::REFORMULATE)).await
    }

    pub async fn summarize(&self, content: &str) -> Result<Option<String>> {
        let prompt = prompt::summarize(content);
        self.generate(&prompt, None, Some(budget::SUMMARIZE)).await
    }

    pub async fn check_compliance(&self, content: &str) -> Result<Option<String>> {
        let prompt = prompt::check_compliance(content);
        self.generate(&prompt, None, Some(budget::CHECK_COMPLIANCE)).await
    }
}
