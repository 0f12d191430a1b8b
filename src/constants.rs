//! Global Constants
//!
//! Centralized defaults for the AI mediator and the renderer.

/// Provider defaults
pub mod ai {
    /// OpenAI-compatible API root
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    /// Model used by every helper unless overridden
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Sampling temperature for all calls
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Output token cap for chat turns and plain generation
    pub const DEFAULT_MAX_TOKENS: u32 = 2048;

    /// Timeout for single-prompt generation (seconds)
    pub const GENERATE_TIMEOUT_SECS: u64 = 120;

    /// Timeout for chat turns (seconds)
    pub const CHAT_TIMEOUT_SECS: u64 = 60;

    /// TCP connect timeout, also bounds stream opening (seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Environment variable consulted when no key is configured
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
}

/// Output token budgets of the drafting helpers
pub mod budget {
    pub const IMPROVE_DOCUMENT: u32 = 4096;
    pub const GENERATE_CLAUSE: u32 = 1024;
    pub const REFORMULATE: u32 = 4096;
    pub const SUMMARIZE: u32 = 1024;
    pub const CHECK_COMPLIANCE: u32 = 1024;
}

/// Chat assistant defaults
pub mod chat {
    /// Persona of the legal assistant, overridable through `chat.system_prompt`
    pub const DEFAULT_SYSTEM_PROMPT: &str = "Tu es un assistant juridique français expert. Tu aides les utilisateurs à rédiger des documents légaux, comprendre des termes juridiques, et répondre à leurs questions sur le droit des affaires, les contrats, et la conformité. Réponds toujours en français de manière claire et professionnelle.";
}

/// Renderer defaults
pub mod render {
    pub const DEFAULT_LOCALE: &str = "fr_FR";
}
