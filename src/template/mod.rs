//! Document Templates
//!
//! A template body is Markdown text with typed placeholders:
//!
//! ```text
//! Fait à {{lieu_signature}}, le {{date_signature:date}}
//! Mode de paiement : {{mode_paiement:select:Virement,Chèque}}
//! ```
//!
//! [`Template::parse`] validates the annotations once, when the template is
//! defined. Rendering only needs the `name -> raw value` record and never
//! fails: unknown placeholders stay in the output verbatim.

mod date;
mod placeholder;
mod renderer;
mod validate;

pub use date::{DEFAULT_LOCALE, format_long, localize, parse_iso_date, parse_locale};
pub use placeholder::{FieldKind, Placeholder};
pub use renderer::{Renderer, render};
pub use validate::{FieldIssue, parse_number};

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::types::{Result, TemplateError};
use placeholder::PLACEHOLDER_RE;

/// A variable declared by a template body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: default_label(&name),
            name,
            kind,
            required: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

// Serialized flat, the way form builders consume it:
// {"name": "...", "type": "select", "options": [...], "required": true, "label": "..."}
impl Serialize for Variable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let options = self.kind.options();
        let len = if options.is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("Variable", len)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", self.kind.type_name())?;
        if let Some(options) = options {
            state.serialize_field("options", options)?;
        }
        state.serialize_field("required", &self.required)?;
        state.serialize_field("label", &self.label)?;
        state.end()
    }
}

/// `partie_1_nom` -> `Partie 1 nom`
fn default_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A validated template body with its declared variables
#[derive(Debug, Clone)]
pub struct Template {
    body: String,
    variables: Vec<Variable>,
}

impl Template {
    /// Parse a body and collect its variables in order of first appearance
    ///
    /// A name may appear several times. Annotated occurrences must agree on
    /// the kind; bare `{{name}}` occurrences adopt the annotated kind.
    pub fn parse(body: impl Into<String>) -> Result<Self> {
        let body = body.into();
        let mut variables: Vec<Variable> = Vec::new();
        let mut annotated: HashMap<String, bool> = HashMap::new();

        for placeholder in Placeholder::scan(&body)? {
            match variables.iter_mut().find(|v| v.name == placeholder.name) {
                None => {
                    annotated.insert(placeholder.name.clone(), placeholder.annotated);
                    variables.push(Variable::new(placeholder.name, placeholder.kind));
                }
                Some(existing) => {
                    if !placeholder.annotated {
                        continue;
                    }
                    let seen_annotated = annotated
                        .insert(existing.name.clone(), true)
                        .unwrap_or(false);
                    if !seen_annotated {
                        existing.kind = placeholder.kind;
                    } else if existing.kind != placeholder.kind {
                        return Err(TemplateError::ConflictingKinds {
                            name: existing.name.clone(),
                            first: existing.kind.to_string(),
                            second: placeholder.kind.to_string(),
                        }
                        .into());
                    }
                }
            }
        }

        Ok(Self { body, variables })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    /// Render the body with `renderer`
    pub fn render<I, K, V>(&self, renderer: &Renderer, data: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        renderer.render(&self.body, data)
    }

    /// Check a data record against the declared variables
    pub fn validate_data<I, K, V>(&self, data: I) -> Vec<FieldIssue>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let owned: Vec<(K, V)> = data.into_iter().collect();
        let record: HashMap<&str, &str> = owned
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect();
        validate::check(&self.variables, &record)
    }

    /// Names of placeholders still present in a rendered text
    pub fn unresolved(rendered: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in PLACEHOLDER_RE.captures_iter(rendered) {
            if let Some(name) = caps.get(1).map(|m| m.as_str())
                && !name.is_empty()
                && !names.iter().any(|n| n == name)
            {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// Extract and validate the typed variables of a body
pub fn parse_template(body: impl Into<String>) -> Result<Template> {
    Template::parse(body)
}
