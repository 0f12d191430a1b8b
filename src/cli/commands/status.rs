//! Status Command
//!
//! Display the effective AI and rendering setup without calling the provider.

use crate::ai::AiMediator;
use crate::cli::util::CommandContext;
use crate::config::ConfigLoader;
use crate::types::Result;

pub fn run(ctx: &CommandContext, format: &str) -> Result<()> {
    let config = &ctx.config;
    let mediator = AiMediator::from_config(&config.ai)?;
    let available = mediator.is_available();
    let project_config = ConfigLoader::project_config_path();

    if format == "json" {
        let status = serde_json::json!({
            "ai": {
                "provider": mediator.provider_name(),
                "api_base": config.ai.api_base,
                "model": config.ai.model,
                "available": available,
            },
            "render": {
                "locale": config.render.locale,
            },
            "chat": {
                "system_prompt": !config.chat.system_prompt.is_empty(),
            },
            "project_config": project_config.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("legaldraft status");
    println!("══════════════════════════════════════");
    println!("AI provider: {} ({})", mediator.provider_name(), config.ai.api_base);
    println!("Model:       {}", config.ai.model);
    println!(
        "API key:     {}",
        if available {
            "configured"
        } else {
            "missing (AI features unavailable)"
        }
    );
    println!(
        "Timeouts:    generate {}s, chat {}s",
        config.ai.timeout_secs, config.ai.chat_timeout_secs
    );
    println!("Locale:      {}", config.render.locale);
    println!(
        "Persona:     {}",
        if config.chat.system_prompt.is_empty() {
            "none"
        } else {
            "configured"
        }
    );
    println!(
        "Project:     {}",
        if project_config.exists() {
            project_config.display().to_string()
        } else {
            "no .legaldraft/config.toml".to_string()
        }
    );

    Ok(())
}
