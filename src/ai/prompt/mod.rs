//! Drafting Prompts
//!
//! French instruction templates behind the assistant helpers. Each builder
//! returns the complete user prompt; the mediator sends it as a single
//! message.

use std::fmt;
use std::str::FromStr;

/// Default tone of `improve_document`
pub const DEFAULT_TONE: &str = "formel";

/// Rewriting style of `reformulate`
///
/// Unrecognised style names fall back to [`ReformulationStyle::Clarify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReformulationStyle {
    Simple,
    Formal,
    Concise,
    Detailed,
    #[default]
    Clarify,
}

impl ReformulationStyle {
    pub const ALL: [ReformulationStyle; 5] = [
        ReformulationStyle::Simple,
        ReformulationStyle::Formal,
        ReformulationStyle::Concise,
        ReformulationStyle::Detailed,
        ReformulationStyle::Clarify,
    ];

    /// Lenient lookup used by callers that accept free-form style names
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReformulationStyle::Simple => "simple",
            ReformulationStyle::Formal => "formel",
            ReformulationStyle::Concise => "concis",
            ReformulationStyle::Detailed => "detaille",
            ReformulationStyle::Clarify => "clarte",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            ReformulationStyle::Simple => "Simplifie le langage, évite le jargon juridique.",
            ReformulationStyle::Formal => "Utilise un langage juridique formel.",
            ReformulationStyle::Concise => "Rends le texte plus court et direct.",
            ReformulationStyle::Detailed => "Développe chaque point avec plus de détails.",
            ReformulationStyle::Clarify => "Améliore la clarté.",
        }
    }
}

impl fmt::Display for ReformulationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReformulationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("Unknown reformulation style: {}", s))
    }
}

pub fn improve_document(content: &str, tone: &str) -> String {
    format!(
        "Tu es un assistant juridique français expert. Améliore ce document juridique pour le rendre plus {tone} et professionnel. Garde la même structure.\n\n\
         Réponds UNIQUEMENT avec le document amélioré complet, en français.\n\n\
         Document à améliorer :\n{content}"
    )
}

/// Clause prompt; context pairs become `- key: value` lines in given order
pub fn generate_clause<I, K, V>(clause_type: &str, context: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let context: String = context
        .into_iter()
        .map(|(key, value)| format!("- {}: {}\n", key.as_ref(), value.as_ref()))
        .collect();

    format!(
        "Tu es un assistant juridique français. Génère une clause \"{clause_type}\" pour un contrat français.\n\
         {context}\n\
         Réponds UNIQUEMENT avec la clause en français, sans explication."
    )
}

pub fn reformulate(content: &str, style: ReformulationStyle) -> String {
    format!(
        "Tu es un assistant juridique français. {}\n\n\
         Texte original :\n{content}\n\n\
         Texte reformulé en français (complet) :",
        style.instruction()
    )
}

pub fn summarize(content: &str) -> String {
    format!(
        "Tu es un assistant juridique français. Résume ce document en points clés :\n\
         - Parties impliquées\n\
         - Objet du contrat\n\
         - Obligations principales\n\
         - Durée et conditions\n\n\
         Document :\n{content}\n\n\
         Résumé structuré en français :"
    )
}

pub fn check_compliance(content: &str) -> String {
    format!(
        "Tu es un juriste français. Analyse ce document et liste :\n\
         1. Clauses manquantes importantes\n\
         2. Formulations à améliorer\n\
         3. Points d'attention juridiques\n\n\
         Document :\n{content}\n\n\
         Analyse en français :"
    )
}
