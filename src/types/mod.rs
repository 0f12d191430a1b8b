pub mod document;
pub mod error;

pub use document::{DocumentStatus, DraftDocument};
pub use error::{AiError, DraftError, ErrorCategory, ErrorClassifier, Result, TemplateError};
