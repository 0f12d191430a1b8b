//! Assistant Commands
//!
//! One-shot calls to the drafting helpers.
//!
//! Usage:
//!   legaldraft generate "Rédige un préambule" [--stream]
//!   legaldraft improve contrat.md [--tone formel]
//!   legaldraft clause confidentialité --context duree="3 ans"
//!   legaldraft reformulate contrat.md [--style simple]
//!   legaldraft summarize contrat.md
//!   legaldraft compliance contrat.md

use std::io::Write;

use futures::StreamExt;
use tracing::debug;

use crate::ai::{AiMediator, FragmentStream, ReformulationStyle};
use crate::api::chat::NO_RESPONSE;
use crate::cli::ui::Output;
use crate::cli::util::read_input;
use crate::types::{AiError, ErrorCategory, Result};

/// Helpers that transform a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTask {
    Improve { tone: Option<String> },
    Reformulate { style: String },
    Summarize,
    Compliance,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub prompt: String,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

pub async fn generate(mediator: &AiMediator, out: &Output, options: GenerateOptions) -> Result<()> {
    let model = options.model.as_deref();

    if options.stream {
        let stream = mediator
            .generate_stream(&options.prompt, model, options.max_tokens)
            .await?;
        let mut stdout = std::io::stdout().lock();
        let text = write_stream(stream, &mut stdout).await?;
        writeln!(stdout)?;
        debug!("Streamed {} characters", text.chars().count());
        return Ok(());
    }

    let text = mediator
        .generate(&options.prompt, model, options.max_tokens)
        .await?;
    emit(mediator, out, text)
}

pub async fn transform(mediator: &AiMediator, out: &Output, task: DocumentTask, source: &str) -> Result<()> {
    let content = read_input(source)?;
    if content.trim().is_empty() {
        out.warning("Input document is empty");
    }

    let text = match task {
        DocumentTask::Improve { tone } => mediator.improve_document(&content, tone.as_deref()).await?,
        DocumentTask::Reformulate { style } => {
            let parsed = style.parse::<ReformulationStyle>().unwrap_or_else(|_| {
                out.warning(&format!(
                    "Unknown style '{}', using '{}'",
                    style,
                    ReformulationStyle::default()
                ));
                ReformulationStyle::default()
            });
            mediator.reformulate(&content, parsed).await?
        }
        DocumentTask::Summarize => mediator.summarize(&content).await?,
        DocumentTask::Compliance => mediator.check_compliance(&content).await?,
    };

    emit(mediator, out, text)
}

pub async fn clause(
    mediator: &AiMediator,
    out: &Output,
    clause_type: &str,
    context: &[(String, String)],
) -> Result<()> {
    let text = mediator
        .generate_clause(clause_type, context.iter().map(|(k, v)| (k, v)))
        .await?;
    emit(mediator, out, text)
}

/// Copy fragments to `writer` as they arrive, returning the full text
///
/// A mid-stream error is returned after the fragments already written.
pub async fn write_stream<W: Write>(mut stream: FragmentStream, writer: &mut W) -> Result<String> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        writer.write_all(fragment.as_bytes())?;
        writer.flush()?;
        text.push_str(&fragment);
    }
    Ok(text)
}

fn emit(mediator: &AiMediator, out: &Output, text: Option<String>) -> Result<()> {
    match text {
        Some(text) => {
            out.text(&text);
            Ok(())
        }
        None => Err(AiError::with_provider(
            ErrorCategory::Unknown,
            NO_RESPONSE,
            mediator.provider_name(),
        )
        .into()),
    }
}
