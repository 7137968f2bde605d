use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lex_translate::config::Config;
use lex_translate::runtime::{report_init_error, LambdaRuntime};
use lex_translate::translate::create_translation_service;
use lex_translate::DialogTranslationHandler;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lex-translate")]
#[command(version, about = "Lex V2 code hook that translates text with Amazon Translate")]
#[command(long_about = "Answers TranslationIntent turns from an Amazon Lex V2 bot: asks for the \
missing language or text slot, then returns the Amazon Translate result.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Poll the Lambda Runtime API for events (default)
    Serve,

    /// Handle a single event and print the response
    Invoke {
        /// Event JSON file (reads stdin when omitted)
        event: Option<PathBuf>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
}

fn init_logging(verbose: bool, ansi: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn build_handler(config: &Config) -> Result<DialogTranslationHandler> {
    config.validate().context("Configuration validation failed")?;
    let service =
        create_translation_service(config).context("Failed to create translation service")?;
    info!("Translation service: {} ({})", service.name(), config.region);
    Ok(DialogTranslationHandler::new(service))
}

async fn serve(config: &Config) -> Result<()> {
    let runtime_api = config.runtime_api.as_deref().context(
        "AWS_LAMBDA_RUNTIME_API not set. Run inside Lambda or use `lex-translate invoke`",
    )?;

    let handler = match build_handler(config) {
        Ok(handler) => handler,
        Err(e) => {
            if let Err(report_error) = report_init_error(runtime_api, &format!("{:#}", e)).await {
                warn!("Could not report init error: {}", report_error);
            }
            return Err(e);
        }
    };

    LambdaRuntime::new(runtime_api, handler)
        .run()
        .await
        .context("Lambda runtime stopped")
}

async fn read_event(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read event from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

async fn invoke(config: &Config, event: Option<&Path>, pretty: bool) -> Result<()> {
    let handler = build_handler(config)?;
    let event = read_event(event).await?;

    let response = handler.handle(&event).await;
    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    init_logging(cli.verbose, !config.in_lambda());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Invoke { event, pretty } => invoke(&config, event.as_deref(), pretty).await,
    }
}
