//! Placeholder syntax and typed field kinds.
//!
//! A placeholder is written `{{name}}`, `{{name:type}}` or
//! `{{name:select:Option A,Option B}}`. The annotation is parsed once, when a
//! template is defined, into a closed [`FieldKind`].

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::TemplateError;

/// Any `{{...}}` token without nested braces.
///
/// Group 1 is the name, group 2 the optional annotation after the first `:`.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}:]*)(?::([^{}]*))?\}\}").expect("placeholder pattern is valid")
});

/// Typed field kinds a placeholder may declare
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    TextArea,
    Number,
    Date,
    /// Closed list of choices, in declaration order
    Select(Vec<String>),
}

impl FieldKind {
    /// Parse the annotation following the placeholder name
    ///
    /// `annotation` is everything after the first `:` (e.g. `select:HT,TTC`).
    pub fn parse(name: &str, annotation: &str) -> Result<Self, TemplateError> {
        let (kind, options) = match annotation.split_once(':') {
            Some((kind, options)) => (kind.trim(), Some(options)),
            None => (annotation.trim(), None),
        };

        let parsed = match kind {
            "" | "text" => FieldKind::Text,
            "textarea" => FieldKind::TextArea,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "select" => {
                let options: Vec<String> = options
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect();
                if options.is_empty() {
                    return Err(TemplateError::MissingOptions {
                        name: name.to_string(),
                    });
                }
                return Ok(FieldKind::Select(options));
            }
            other => {
                return Err(TemplateError::UnknownKind {
                    name: name.to_string(),
                    kind: other.to_string(),
                });
            }
        };

        if options.is_some_and(|o| !o.trim().is_empty()) {
            return Err(TemplateError::UnexpectedOptions {
                name: name.to_string(),
                kind: parsed.type_name().to_string(),
            });
        }

        Ok(parsed)
    }

    /// Name used in template annotations and JSON output
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Select(_) => "select",
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Select(options) => Some(options),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Select(options) => write!(f, "select({})", options.join(", ")),
            other => f.write_str(other.type_name()),
        }
    }
}

/// One placeholder occurrence in a template body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub kind: FieldKind,
    /// False for a bare `{{name}}`; such an occurrence adopts the kind declared elsewhere
    pub annotated: bool,
    /// Byte range of the whole `{{...}}` token
    pub span: Range<usize>,
}

impl Placeholder {
    /// Scan a body for placeholders, validating each annotation
    pub fn scan(body: &str) -> Result<Vec<Placeholder>, TemplateError> {
        PLACEHOLDER_RE
            .captures_iter(body)
            .map(|caps| {
                let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                if !is_valid_name(name) {
                    return Err(TemplateError::InvalidName {
                        name: name.to_string(),
                    });
                }
                let annotation = caps.get(2).map(|m| m.as_str());
                let kind = match annotation {
                    Some(a) => FieldKind::parse(name, a)?,
                    None => FieldKind::Text,
                };
                Ok(Placeholder {
                    name: name.to_string(),
                    kind,
                    annotated: annotation.is_some(),
                    span: whole,
                })
            })
            .collect()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
