//! Data record checks against a template's declared variables.
//!
//! These checks never block rendering. They let a caller tell the user which
//! fields still need attention before a document leaves the draft state.

use std::collections::HashMap;
use std::fmt;

use super::date;
use super::{FieldKind, Variable};

/// A problem found in one field of a data record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Required field absent or blank
    Missing { name: String },
    /// Number field whose value does not parse as a number
    NotANumber { name: String, value: String },
    /// Date field whose value is not a valid `YYYY-MM-DD` date
    InvalidDate { name: String, value: String },
    /// Select field whose value is not one of the declared options
    NotAnOption {
        name: String,
        value: String,
        options: Vec<String>,
    },
}

impl FieldIssue {
    pub fn name(&self) -> &str {
        match self {
            FieldIssue::Missing { name }
            | FieldIssue::NotANumber { name, .. }
            | FieldIssue::InvalidDate { name, .. }
            | FieldIssue::NotAnOption { name, .. } => name,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing { name } => write!(f, "{}: value required", name),
            FieldIssue::NotANumber { name, value } => {
                write!(f, "{}: '{}' is not a number", name, value)
            }
            FieldIssue::InvalidDate { name, value } => {
                write!(f, "{}: '{}' is not a YYYY-MM-DD date", name, value)
            }
            FieldIssue::NotAnOption {
                name,
                value,
                options,
            } => write!(
                f,
                "{}: '{}' is not one of {}",
                name,
                value,
                options.join(", ")
            ),
        }
    }
}

/// Check every declared variable against the data record
pub(crate) fn check(variables: &[Variable], data: &HashMap<&str, &str>) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    for var in variables {
        let value = data.get(var.name.as_str()).map(|v| v.trim());
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                if var.required {
                    issues.push(FieldIssue::Missing {
                        name: var.name.clone(),
                    });
                }
                continue;
            }
        };

        match &var.kind {
            FieldKind::Number if parse_number(value).is_none() => {
                issues.push(FieldIssue::NotANumber {
                    name: var.name.clone(),
                    value: value.to_string(),
                });
            }
            FieldKind::Date if date::parse_iso_date(value).is_none() => {
                issues.push(FieldIssue::InvalidDate {
                    name: var.name.clone(),
                    value: value.to_string(),
                });
            }
            FieldKind::Select(options) if !options.iter().any(|o| o == value) => {
                issues.push(FieldIssue::NotAnOption {
                    name: var.name.clone(),
                    value: value.to_string(),
                    options: options.clone(),
                });
            }
            _ => {}
        }
    }

    issues
}

/// Lenient number parsing for form input: `50000`, `85.5`, `1 234,50`
pub fn parse_number(value: &str) -> Option<f64> {
    let normalized: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
