//! Generated documents and their workflow status.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::template::{FieldIssue, Renderer, Template};

/// Workflow status of a generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Review,
    Approved,
    Signed,
    Archived,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Draft,
        DocumentStatus::Review,
        DocumentStatus::Approved,
        DocumentStatus::Signed,
        DocumentStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Review => "review",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Signed => "signed",
            DocumentStatus::Archived => "archived",
        }
    }

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Brouillon",
            DocumentStatus::Review => "En revue",
            DocumentStatus::Approved => "Approuvé",
            DocumentStatus::Signed => "Signé",
            DocumentStatus::Archived => "Archivé",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown document status: {}. Valid values: draft, review, approved, signed, archived",
                    s
                )
            })
    }
}

/// A document being drafted from a template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftDocument {
    #[serde(default)]
    pub status: DocumentStatus,
    /// Raw form values, keyed by placeholder name
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl DraftDocument {
    pub fn new(data: BTreeMap<String, String>) -> Self {
        Self {
            status: DocumentStatus::Draft,
            data,
        }
    }

    /// Materialize the document content from its template
    pub fn generate_content(&self, template: &Template, renderer: &Renderer) -> String {
        template.render(renderer, &self.data)
    }

    pub fn issues(&self, template: &Template) -> Vec<FieldIssue> {
        template.validate_data(&self.data)
    }
}
