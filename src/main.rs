use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legaldraft::cli::commands::assist::{DocumentTask, GenerateOptions};
use legaldraft::cli::commands::render::RenderOptions;
use legaldraft::cli::{CommandContext, Output, parse_pair};

#[derive(Parser)]
#[command(name = "legaldraft")]
#[command(
    version,
    about = "Render legal document templates and draft with an AI assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Use this config file instead of the layered lookup")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template with a data record
    Render {
        #[arg(help = "Template file, '-' for stdin")]
        template: String,
        #[arg(long, short, help = "JSON object with field values")]
        data: Option<PathBuf>,
        #[arg(long = "set", short = 's', value_parser = parse_pair, help = "Field value as key=value (repeatable)")]
        set: Vec<(String, String)>,
        #[arg(long, help = "Date locale, e.g. fr_FR or en_US")]
        locale: Option<String>,
        #[arg(long, help = "Fail instead of rendering when field values have issues")]
        strict: bool,
        #[arg(long, short, help = "Output file (default: stdout)")]
        output: Option<PathBuf>,
    },

    /// List the fields a template declares
    Fields {
        #[arg(help = "Template file, '-' for stdin")]
        template: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Chat with the legal assistant (interactive without a message)
    Chat {
        message: Option<String>,
        #[arg(long, help = "Send no system prompt")]
        no_system: bool,
    },

    /// Generate text from a free-form prompt
    Generate {
        prompt: String,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, help = "Output token cap")]
        max_tokens: Option<u32>,
        #[arg(long, help = "Print text as it is generated")]
        stream: bool,
    },

    /// Improve a document's wording
    Improve {
        #[arg(help = "Document file, '-' for stdin")]
        file: String,
        #[arg(long, help = "Target tone (default: formel)")]
        tone: Option<String>,
    },

    /// Draft a contract clause
    Clause {
        #[arg(help = "Clause type, e.g. confidentialité")]
        clause_type: String,
        #[arg(long, value_parser = parse_pair, help = "Context as key=value (repeatable)")]
        context: Vec<(String, String)>,
    },

    /// Rewrite a document in another style
    Reformulate {
        #[arg(help = "Document file, '-' for stdin")]
        file: String,
        #[arg(
            long,
            default_value = "clarte",
            help = "Style: simple, formel, concis, detaille, clarte"
        )]
        style: String,
    },

    /// Summarize a document in key points
    Summarize {
        #[arg(help = "Document file, '-' for stdin")]
        file: String,
    },

    /// List missing clauses and legal points of attention
    Compliance {
        #[arg(help = "Document file, '-' for stdin")]
        file: String,
    },

    /// Show the effective setup
    Status {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mlegaldraft encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let out = Output::quiet(cli.quiet);

    // Config commands must work even when the config is broken
    if let Commands::Config { action } = cli.command {
        match action {
            ConfigAction::Show { global, format } => {
                legaldraft::cli::commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                legaldraft::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    legaldraft::cli::commands::config::init_global(force)?;
                } else {
                    legaldraft::cli::commands::config::init_project(force)?;
                }
            }
        }
        return Ok(());
    }

    let ctx = CommandContext::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            template,
            data,
            set,
            locale,
            strict,
            output,
        } => {
            legaldraft::cli::commands::render::run(
                &ctx,
                &out,
                RenderOptions {
                    template,
                    data,
                    set,
                    locale,
                    strict,
                    output,
                },
            )?;
        }
        Commands::Fields { template, format } => {
            legaldraft::cli::commands::render::fields(&template, &format)?;
        }
        Commands::Status { format } => {
            legaldraft::cli::commands::status::run(&ctx, &format)?;
        }
        Commands::Config { .. } => {}
        command => {
            let mediator = ctx.mediator()?;
            let rt = Runtime::new()?;
            rt.block_on(async {
                use legaldraft::cli::commands::{assist, chat};

                match command {
                    Commands::Chat { message, no_system } => {
                        let system_prompt = if no_system {
                            ""
                        } else {
                            ctx.config.chat.system_prompt.as_str()
                        };
                        chat::run(&mediator, &out, system_prompt, message).await
                    }
                    Commands::Generate {
                        prompt,
                        model,
                        max_tokens,
                        stream,
                    } => {
                        let options = GenerateOptions {
                            prompt,
                            model,
                            max_tokens,
                            stream,
                        };
                        assist::generate(&mediator, &out, options).await
                    }
                    Commands::Improve { file, tone } => {
                        assist::transform(&mediator, &out, DocumentTask::Improve { tone }, &file).await
                    }
                    Commands::Clause {
                        clause_type,
                        context,
                    } => assist::clause(&mediator, &out, &clause_type, &context).await,
                    Commands::Reformulate { file, style } => {
                        assist::transform(&mediator, &out, DocumentTask::Reformulate { style }, &file)
                            .await
                    }
                    Commands::Summarize { file } => {
                        assist::transform(&mediator, &out, DocumentTask::Summarize, &file).await
                    }
                    Commands::Compliance { file } => {
                        assist::transform(&mediator, &out, DocumentTask::Compliance, &file).await
                    }
                    _ => Ok(()),
                }
            })?;
        }
    }

    Ok(())
}
