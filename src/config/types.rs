//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/legaldraft/) and project (.legaldraft/) level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{ai as ai_defaults, chat as chat_defaults, render as render_defaults};
use crate::types::{DraftError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// AI provider settings
    pub ai: AiConfig,

    /// Template rendering settings
    pub render: RenderConfig,

    /// Chat assistant settings
    pub chat: ChatConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            ai: AiConfig::default(),
            render: RenderConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `DraftError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(DraftError::Config(format!(
                "AI temperature must be between 0.0 and 2.0, got {}",
                self.ai.temperature
            )));
        }

        if self.ai.max_tokens == 0 {
            return Err(DraftError::Config(
                "AI max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.ai.timeout_secs == 0 || self.ai.chat_timeout_secs == 0 {
            return Err(DraftError::Config(
                "AI timeout_secs and chat_timeout_secs must be greater than 0".to_string(),
            ));
        }

        url::Url::parse(&self.ai.api_base).map_err(|e| {
            DraftError::Config(format!("Invalid AI api_base '{}': {}", self.ai.api_base, e))
        })?;

        crate::template::parse_locale(&self.render.locale)?;

        Ok(())
    }
}

// =============================================================================
// AI Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider name
    pub provider: String,

    /// OpenAI-compatible API root, without `/chat/completions`
    pub api_base: String,

    /// API key; falls back to `OPENAI_API_KEY`, never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token cap for chat and plain generation
    pub max_tokens: u32,

    /// Generation request timeout in seconds
    pub timeout_secs: u64,

    /// Chat request timeout in seconds
    pub chat_timeout_secs: u64,

    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_base: ai_defaults::DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: ai_defaults::DEFAULT_MODEL.to_string(),
            temperature: ai_defaults::DEFAULT_TEMPERATURE,
            max_tokens: ai_defaults::DEFAULT_MAX_TOKENS,
            timeout_secs: ai_defaults::GENERATE_TIMEOUT_SECS,
            chat_timeout_secs: ai_defaults::CHAT_TIMEOUT_SECS,
            connect_timeout_secs: ai_defaults::CONNECT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("chat_timeout_secs", &self.chat_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl AiConfig {
    /// Whether a non-blank key is set
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Fill in the key from the environment when none is configured
    pub fn with_key_fallback(mut self, env_key: Option<String>) -> Self {
        if !self.has_api_key() {
            self.api_key = env_key.filter(|k| !k.trim().is_empty());
        }
        self
    }
}

// =============================================================================
// Render Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// glibc-style locale name used for long-form dates
    pub locale: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: render_defaults::DEFAULT_LOCALE.to_string(),
        }
    }
}

// =============================================================================
// Chat Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Persona sent as the system message of every chat turn; empty disables it
    pub system_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: chat_defaults::DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}
