//! CLI Common Utilities
//!
//! Shared initialization and input handling for CLI commands.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::ai::AiMediator;
use crate::config::{Config, ConfigLoader};
use crate::template::Renderer;
use crate::types::{AiError, DraftError, ErrorCategory, Result};

/// Command execution context
///
/// Created once per invocation; commands borrow the pieces they need.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    /// Load configuration, from `config_path` alone when one is given
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) if !path.exists() => {
                return Err(DraftError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };

        Ok(Self { config })
    }

    /// Renderer for the configured locale, unless overridden
    pub fn renderer(&self, locale: Option<&str>) -> Result<Renderer> {
        Renderer::from_locale_name(locale.unwrap_or(&self.config.render.locale))
    }

    /// Mediator that is known to have credentials
    pub fn mediator(&self) -> Result<AiMediator> {
        let mediator = AiMediator::from_config(&self.config.ai)?;
        if !mediator.is_available() {
            return Err(AiError::with_provider(
                ErrorCategory::Auth,
                format!(
                    "API key not configured. Set {} or ai.api_key in the config file",
                    crate::constants::ai::API_KEY_ENV
                ),
                mediator.provider_name(),
            )
            .into());
        }
        Ok(mediator)
    }
}

/// Read a document from a file, or from stdin when `source` is `-`
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(PathBuf::from(source))?)
}

/// `key=value` argument parser for clap
pub fn parse_pair(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", arg));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Load a data record from a JSON object file
///
/// Strings are taken as-is; numbers and booleans use their JSON text; `null`
/// entries are dropped. Nested values are rejected.
pub fn load_data_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let serde_json::Value::Object(map) = value else {
        return Err(DraftError::Config(format!(
            "Data file must contain a JSON object: {}",
            path.display()
        )));
    };

    let mut record = BTreeMap::new();
    for (key, value) in map {
        let raw = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => {
                return Err(DraftError::Config(format!(
                    "Data field '{}' must be a string, number or boolean",
                    key
                )));
            }
        };
        record.insert(key, raw);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("ville=Paris"),
            Ok(("ville".to_string(), "Paris".to_string()))
        );
        assert_eq!(
            parse_pair("formule=a=b"),
            Ok(("formule".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_pair("vide="), Ok(("vide".to_string(), String::new())));
        assert!(parse_pair("ville").is_err());
        assert!(parse_pair("=Paris").is_err());
    }

    #[test]
    fn test_load_data_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"entreprise_nom": "ACME", "capital": 50000, "tva": true, "note": null}"#,
        )
        .unwrap();

        let record = load_data_file(&path).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record["entreprise_nom"], "ACME");
        assert_eq!(record["capital"], "50000");
        assert_eq!(record["tva"], "true");
    }

    #[test]
    fn test_load_data_file_rejects_nested_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        std::fs::write(&path, r#"{"parties": ["A", "B"]}"#).unwrap();
        assert!(load_data_file(&path).is_err());

        std::fs::write(&path, r#"["A"]"#).unwrap();
        assert!(load_data_file(&path).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contrat.md");
        std::fs::write(&path, "Article 1").unwrap();

        assert_eq!(read_input(path.to_str().unwrap()).unwrap(), "Article 1");
        assert!(read_input(dir.path().join("absent.md").to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = CommandContext::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, DraftError::Config(_)));
    }

    #[test]
    fn test_context_without_key_refuses_mediator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ai]\napi_key = \"\"\n[render]\nlocale = \"en_US\"\n").unwrap();

        // load_from_file still honours OPENAI_API_KEY, so clear it on the loaded value
        let mut context = CommandContext::load(Some(path.as_path())).unwrap();
        context.config.ai.api_key = None;

        let err = context.mediator().unwrap_err();
        assert_eq!(err.as_ai().unwrap().category, ErrorCategory::Auth);
        assert!(context.renderer(None).is_ok());
        assert!(context.renderer(Some("zz_ZZ")).is_err());
    }
}
