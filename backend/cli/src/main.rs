mod config;
mod shell;
mod terminal_output;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use deploybot_commands::Bot;
use deploybot_config::{load_and_prepare, redact, DeployBotConfig, ValidationReport, DEFAULT_API_URL};
use deploybot_core::DeployBotError;
use deploybot_github::GitHubClient;
use deploybot_logging::init_logger;

use config::Config;
use shell::Speaker;
use terminal_output::{note_error, note_success, note_warn};

#[derive(Parser)]
#[command(name = "deploybot")]
#[command(about = "Chat-driven deployments via the GitHub deployments API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single chat message to the bot
    Say {
        /// Message text, e.g. `deploy myapp/feature to staging`
        #[arg(required = true)]
        message: Vec<String>,
        /// Chat handle of the sender
        #[arg(short, long)]
        user: Option<String>,
        /// Room the message is posted in
        #[arg(short, long)]
        room: Option<String>,
    },
    /// Interactive session reading messages from stdin
    Shell {
        #[arg(short, long)]
        user: Option<String>,
        #[arg(short, long)]
        room: Option<String>,
    },
    /// Validate the config file and print it with secrets masked
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    let path = config.config_path();

    let (file, report) = load_and_prepare(&path).await?;
    init_logger(config.log_dir(&file), &Config::log_level(&file))?;
    info!(
        path = %path.display(),
        apps = file.apps.len(),
        warnings = report.warnings.len(),
        errors = report.errors.len(),
        "Config loaded"
    );

    match cli.command {
        Commands::CheckConfig => check_config(&path, &file, &report)?,
        Commands::Say { message, user, room } => {
            let bot = build_bot(&path, file, &report)?;
            shell::say(&bot, &Speaker::new(user, room), &message.join(" ")).await?;
        }
        Commands::Shell { user, room } => {
            let bot = build_bot(&path, file, &report)?;
            shell::run(&bot, &Speaker::new(user, room)).await?;
        }
    }

    Ok(())
}

fn build_bot(path: &Path, file: DeployBotConfig, report: &ValidationReport) -> Result<Bot> {
    if !report.is_valid() {
        return Err(DeployBotError::ConfigError(format!(
            "{} error(s) in {}; run `deploybot check-config`",
            report.errors.len(),
            path.display()
        ))
        .into());
    }
    let token = file
        .access_token
        .clone()
        .ok_or_else(|| DeployBotError::ConfigError("access_token is not set".into()))?;
    let api_url = file.api_url.clone().unwrap_or_else(|| DEFAULT_API_URL.to_string());

    info!(api_url = %api_url, "Using deployments API");
    let client = GitHubClient::new(api_url, token);
    Ok(Bot::new(Arc::new(file), Arc::new(client)))
}

fn check_config(path: &Path, file: &DeployBotConfig, report: &ValidationReport) -> Result<()> {
    println!("Config: {}\n", path.display());
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    let masked = redact(&serde_json::to_value(file)?);
    println!("\n{}", serde_yaml::to_string(&masked)?);

    if !report.is_valid() {
        return Err(DeployBotError::ConfigError(format!(
            "{} validation error(s)",
            report.errors.len()
        ))
        .into());
    }
    note_success("Config is valid");
    Ok(())
}
