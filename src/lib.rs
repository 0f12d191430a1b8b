//! legaldraft - Legal Document Drafting Core
//!
//! Template rendering and AI assistance for legal documents: reusable
//! templates with typed placeholders, and a mediator over an
//! OpenAI-compatible chat-completion API.
//!
//! ## Core Features
//!
//! - **Typed Placeholders**: `{{name}}`, `{{name:date}}`, `{{name:select:A,B}}`
//! - **Localized Dates**: `2025-01-15` renders as `15 janvier 2025`
//! - **Drafting Helpers**: improve, reformulate, summarize, compliance check, clause drafting
//! - **Streaming**: token-by-token generation as a lazy stream
//!
//! ## Quick Start
//!
//! ```ignore
//! use legaldraft::{AiMediator, ConfigLoader, Renderer, Template};
//!
//! let template = Template::parse("Fait à {{ville}}, le {{date_signature:date}}")?;
//! let text = template.render(&Renderer::default(), [("ville", "Paris"), ("date_signature", "2025-01-15")]);
//!
//! let config = ConfigLoader::load()?;
//! let mediator = AiMediator::from_config(&config.ai)?;
//! let summary = mediator.summarize(&text).await?;
//! ```
//!
//! ## Modules
//!
//! - [`template`]: placeholder parsing, rendering, data checks
//! - [`ai`]: provider abstraction, mediator, drafting prompts
//! - [`api`]: framework-agnostic chat endpoint adapter
//! - [`config`]: layered configuration
//! - [`types`]: errors and document types

pub mod ai;
pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod template;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{AiConfig, Config, ConfigLoader};

// Error Types
pub use types::error::{AiError, DraftError, ErrorCategory, Result, TemplateError};

// Documents
pub use types::{DocumentStatus, DraftDocument};

// =============================================================================
// Template Re-exports
// =============================================================================

pub use template::{FieldIssue, FieldKind, Renderer, Template, Variable, parse_template, render};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    AiMediator, ChatRequest, CompletionProvider, FragmentStream, MediatorSettings, Message,
    OpenAiProvider, ReformulationStyle, Role,
};
pub use api::{ChatReply, ChatRequestBody, handle_chat};
