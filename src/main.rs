//! YourDay CLI
//!
//! `yourday run` collects today's weather and headlines, has the configured
//! Bedrock model write a Markdown summary, and posts it to the Obsidian vault.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use yourday_agent::{BedrockModel, DailySummaryAgent};
use yourday_core::{AppError, Config};
use yourday_news::NewsClient;
use yourday_vault::VaultClient;
use yourday_weather::WeatherProvider;

#[derive(Parser)]
#[command(name = "yourday")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily weather & news summary for your Obsidian vault", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate today's summary and post it to the vault
    Run,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_command(),
    }
}

fn run_command() -> ExitCode {
    match execute() {
        Ok(file_path) => {
            println!("\n✓ Success! Daily summary posted to: {}", file_path);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let failure = Failure::from_error(&err);
            eprintln!("{}", failure.message);
            if let Some(hint) = failure.hint {
                eprintln!("  {}", hint);
            }
            ExitCode::from(failure.code)
        }
    }
}

/// What a failed run prints to stderr, and its exit status.
#[derive(Debug, PartialEq, Eq)]
struct Failure {
    message: String,
    hint: Option<&'static str>,
    code: u8,
}

impl Failure {
    fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<AppError>() {
            Some(app_err) => Self {
                message: format!("\n✗ Error: {}", app_err),
                hint: Some(app_err.user_message()),
                code: 1,
            },
            None => Self {
                message: format!("\n✗ Unexpected error: {:#}", err),
                hint: None,
                code: 1,
            },
        }
    }
}

fn execute() -> Result<String> {
    // A missing .env file is fine, the environment may already be set
    dotenvy::dotenv().ok();

    println!("Loading configuration...");
    let config = Config::from_env().map_err(AppError::from)?;
    yourday_core::init_logging(&config.log_level);
    tracing::debug!(?config, "Configuration loaded");

    println!("Initializing clients...");
    let weather = WeatherProvider::new(config.location.as_str()).map_err(AppError::from)?;
    let news = NewsClient::new(&config.news_api_key).map_err(AppError::from)?;
    let vault = VaultClient::new(&config.obsidian_api_key, &config.obsidian_base_url)
        .map_err(AppError::from)?;

    println!("Initializing YourDay Agent...");
    let model = BedrockModel::from_config(&config).map_err(AppError::from)?;
    tracing::info!("Using model {}", model.model_id());
    let agent = DailySummaryAgent::new(weather, news, model, vault);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    println!("Generating daily summary...");
    let file_path = runtime.block_on(agent.run())?;

    Ok(file_path)
}
