//! Render Command
//!
//! Materialize a document from a template and a data record.
//!
//! Usage:
//!   legaldraft render contrat.md --data client.json --set ville=Paris
//!   legaldraft fields contrat.md [-f json]

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, load_data_file, read_input};
use crate::template::Template;
use crate::types::{DraftDocument, DraftError, Result};

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Template file, `-` for stdin
    pub template: String,
    /// JSON object with the field values
    pub data: Option<PathBuf>,
    /// Values given on the command line, applied after `data`
    pub set: Vec<(String, String)>,
    pub locale: Option<String>,
    /// Refuse to render when the record has issues
    pub strict: bool,
    /// Write to this file instead of stdout
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &CommandContext, out: &Output, options: RenderOptions) -> Result<()> {
    let template = Template::parse(read_input(&options.template)?)?;
    let renderer = ctx.renderer(options.locale.as_deref())?;

    let mut record = match &options.data {
        Some(path) => load_data_file(path)?,
        None => BTreeMap::new(),
    };
    record.extend(options.set);

    let document = DraftDocument::new(record);
    let issues = document.issues(&template);
    out.field_issues(&issues);
    if options.strict && !issues.is_empty() {
        return Err(DraftError::InvalidData(format!(
            "{} field issue(s), nothing rendered",
            issues.len()
        )));
    }

    let content = document.generate_content(&template, &renderer);

    let unresolved = Template::unresolved(&content);
    if !unresolved.is_empty() {
        out.warning(&format!("Unresolved placeholders: {}", unresolved.join(", ")));
    }

    match &options.output {
        Some(path) => {
            std::fs::write(path, &content)?;
            out.success(&format!("Written to {}", path.display()));
        }
        None => out.text(&content),
    }

    Ok(())
}

/// List the variables a template declares
pub fn fields(template: &str, format: &str) -> Result<()> {
    let template = Template::parse(read_input(template)?)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(template.variables())?);
        return Ok(());
    }

    let width = template
        .variables()
        .iter()
        .map(|v| v.name.len())
        .max()
        .unwrap_or(0);

    for variable in template.variables() {
        let options = variable
            .kind
            .options()
            .map(|opts| format!(" [{}]", opts.join(", ")))
            .unwrap_or_default();
        println!(
            "{:<width$}  {:<8}  {}{}{}",
            variable.name,
            variable.kind.type_name(),
            variable.label,
            if variable.required { "" } else { " (optional)" },
            options,
            width = width
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn context() -> CommandContext {
        CommandContext {
            config: Config::default(),
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_render_to_file_with_overrides() {
        let dir = TempDir::new().unwrap();
        let template = write(
            &dir,
            "nda.md",
            "Entre {{partie_1_nom}} et {{partie_2_nom}}, le {{date_signature:date}} à {{ville}}.",
        );
        let data = write(
            &dir,
            "data.json",
            r#"{"partie_1_nom": "ACME Technologies", "partie_2_nom": "Beta", "date_signature": "2025-01-15"}"#,
        );
        let output = dir.path().join("out.md");

        run(
            &context(),
            &Output::quiet(true),
            RenderOptions {
                template: template.to_string_lossy().into_owned(),
                data: Some(data),
                set: vec![
                    ("partie_2_nom".to_string(), "Startup Innov'".to_string()),
                    ("ville".to_string(), "Lyon".to_string()),
                ],
                output: Some(output.clone()),
                ..RenderOptions::default()
            },
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Entre ACME Technologies et Startup Innov', le 15 janvier 2025 à Lyon."
        );
    }

    #[test]
    fn test_strict_render_refuses_incomplete_record() {
        let dir = TempDir::new().unwrap();
        let template = write(&dir, "t.md", "{{capital:number}} € - {{ville}}");
        let output = dir.path().join("out.md");

        let err = run(
            &context(),
            &Output::quiet(true),
            RenderOptions {
                template: template.to_string_lossy().into_owned(),
                set: vec![("capital".to_string(), "beaucoup".to_string())],
                strict: true,
                output: Some(output.clone()),
                ..RenderOptions::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, DraftError::InvalidData(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_render_locale_override() {
        let dir = TempDir::new().unwrap();
        let template = write(&dir, "t.md", "Dated {{date:date}}");
        let output = dir.path().join("out.md");

        run(
            &context(),
            &Output::quiet(true),
            RenderOptions {
                template: template.to_string_lossy().into_owned(),
                set: vec![("date".to_string(), "2025-01-15".to_string())],
                locale: Some("en_US".to_string()),
                output: Some(output.clone()),
                ..RenderOptions::default()
            },
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Dated 15 January 2025");
    }

    #[test]
    fn test_bad_template_is_a_definition_error() {
        let dir = TempDir::new().unwrap();
        let template = write(&dir, "t.md", "{{prix:currency}}");

        let err = fields(&template.to_string_lossy(), "text").unwrap_err();
        assert!(matches!(err, DraftError::Template(_)));
    }
}
