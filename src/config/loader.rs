//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/legaldraft/config.toml)
//! 3. Project config (.legaldraft/config.toml)
//! 4. Environment variables (LEGALDRAFT_* prefix, `__` between sections)
//!
//! `OPENAI_API_KEY` is consulted last, only when no key was configured.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::ai::API_KEY_ENV;
use crate::types::{DraftError, Result};

const APP_DIR: &str = "legaldraft";
const ENV_PREFIX: &str = "LEGALDRAFT_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        let figment = Self::layered(global.as_deref(), Some(project.as_path()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::finish(figment, env::var(API_KEY_ENV).ok())
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));

        Self::finish(figment, env::var(API_KEY_ENV).ok())
    }

    /// Defaults overlaid with whichever config files exist
    fn layered(global: Option<&Path>, project: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
    }

    fn finish(figment: Figment, env_key: Option<String>) -> Result<Config> {
        let mut config: Config = figment
            .extract()
            .map_err(|e| DraftError::Config(format!("Configuration error: {}", e)))?;

        config.ai = config.ai.with_key_fallback(env_key);
        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/legaldraft/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config")))
            .map(|p| p.join(APP_DIR))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".legaldraft")
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    ///
    /// The API key is never printed; only its presence is reported.
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| DraftError::Config(e.to_string()))?
            );
        }
        println!(
            "# api key: {}",
            if config.ai.has_api_key() { "configured" } else { "not set" }
        );

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            DraftError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_config(&global_dir, force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_config(&project_dir, force)?;
        Ok(project_dir)
    }

    /// Write the default config into `dir`, keeping an existing file unless forced
    pub fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default config content (TOML)
    fn default_config() -> String {
        format!(
            r#"# legaldraft configuration
# Project settings in .legaldraft/config.toml override ~/.config/legaldraft/config.toml.
# Environment variables override both, e.g. LEGALDRAFT_AI__MODEL=gpt-4o.

version = "1.0"

[ai]
provider = "openai"
api_base = "{api_base}"
# api_key = "sk-..."  # or export {key_env}
model = "{model}"
temperature = {temperature}
max_tokens = {max_tokens}
timeout_secs = {timeout}
chat_timeout_secs = {chat_timeout}

[render]
locale = "{locale}"

# [chat]
# system_prompt = "..."  # persona of the chat assistant, empty to disable
"#,
            api_base = crate::constants::ai::DEFAULT_API_BASE,
            key_env = API_KEY_ENV,
            model = crate::constants::ai::DEFAULT_MODEL,
            temperature = crate::constants::ai::DEFAULT_TEMPERATURE,
            max_tokens = crate::constants::ai::DEFAULT_MAX_TOKENS,
            timeout = crate::constants::ai::GENERATE_TIMEOUT_SECS,
            chat_timeout = crate::constants::ai::CHAT_TIMEOUT_SECS,
            locale = crate::constants::render::DEFAULT_LOCALE,
        )
    }
}
