//! Unified Error Type System
//!
//! Centralized error types for the drafting core.
//!
//! ## Error Categories
//!
//! - **RateLimit**: Provider throttling
//! - **Auth**: Missing or rejected credentials
//! - **Network**: Connectivity issues and timeouts
//! - **Transient**: Temporary server issues
//! - **Unavailable**: Endpoint or model not found
//!
//! Categories are informational only. Nothing in this crate retries:
//! the retry policy belongs to the caller.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// AI error categories, exposed so callers can decide on their own retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited by the provider
    RateLimit,
    /// Missing or rejected API key
    Auth,
    /// Network/connectivity issues, including timeouts
    Network,
    /// Endpoint or model not found
    Unavailable,
    /// Request rejected as invalid
    BadRequest,
    /// Provider response could not be decoded
    ParseError,
    /// Temporary server-side issue
    Transient,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Whether a caller may reasonably try the same request again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit | Self::Network | Self::Transient)
    }
}

// =============================================================================
// AI Error
// =============================================================================

/// Uniform AI error: every provider failure is reported through this type
#[derive(Debug, Clone)]
pub struct AiError {
    pub category: ErrorCategory,
    pub message: String,
    pub provider: Option<String>,
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for AiError {}

impl AiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Error raised when a call is attempted without credentials
    pub fn not_configured(provider: impl Into<String>) -> Self {
        Self::with_provider(ErrorCategory::Auth, "API key not configured", provider)
    }

    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code returned by the provider
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> AiError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 422 => ErrorCategory::BadRequest,
            404 => ErrorCategory::Unavailable,
            500 | 502 | 503 | 504 => ErrorCategory::Transient,
            _ => ErrorCategory::Unknown,
        };
        AiError::with_provider(category, message, provider)
    }

    /// Classify a transport-level failure from the HTTP client
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> AiError {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else if let Some(status) = err.status() {
            return Self::classify_http_status(status.as_u16(), &err.to_string(), provider);
        } else {
            ErrorCategory::Network
        };
        AiError::with_provider(category, err.to_string(), provider)
    }
}

// =============================================================================
// Template Error
// =============================================================================

/// Definition-time template errors, reported with the offending placeholder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown field type '{kind}' for placeholder '{name}'")]
    UnknownKind { name: String, kind: String },

    #[error("select placeholder '{name}' declares no options")]
    MissingOptions { name: String },

    #[error("placeholder '{name}' of type {kind} does not accept options")]
    UnexpectedOptions { name: String, kind: String },

    #[error("placeholder '{name}' is declared as both {first} and {second}")]
    ConflictingKinds {
        name: String,
        first: String,
        second: String,
    },

    #[error("invalid placeholder name '{name}'")]
    InvalidName { name: String },
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider failure (transport, auth, HTTP status, undecodable body)
    #[error("Erreur IA: {0}")]
    Ai(AiError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Config error: {0}")]
    Config(String),

    /// Data record rejected before rendering
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<AiError> for DraftError {
    fn from(err: AiError) -> Self {
        DraftError::Ai(err)
    }
}

pub type Result<T> = std::result::Result<T, DraftError>;

impl DraftError {
    /// Underlying AI error, if this is one
    pub fn as_ai(&self) -> Option<&AiError> {
        match self {
            Self::Ai(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.as_ai().is_some_and(AiError::is_retryable)
    }
}
