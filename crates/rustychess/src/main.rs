//! RustyChess - play chess against an engine in the terminal.

#![warn(missing_docs)]

mod cli;
mod play;
mod selfplay;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rustychess::{AppConfig, SessionController};
use rustychess_engine::SearchEngineFactory;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,rustychess=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Tui);

    match command {
        Command::Tui => tui::init_tracing()?,
        Command::Play | Command::Selfplay { .. } => init_stderr_tracing(),
    }

    let config = cli.apply_overrides(AppConfig::load(cli.config.as_deref())?);
    config.validate()?;
    info!(?command, depth = config.engine().search_depth(), "Starting rustychess");

    match command {
        Command::Tui => tui::run_tui(config).await,
        Command::Play => play::run(config).await,
        Command::Selfplay { plies } => selfplay::run(config, plies).await,
    }
}

/// Builds the env filter, falling back to [`DEFAULT_LOG_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Logs to stderr for the line-mode commands.
fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Creates a session for the configured position and starts loading the engine.
fn build_session(config: &AppConfig) -> Result<SessionController> {
    let rules = config.session().rules()?;
    let factory = Arc::new(SearchEngineFactory::new(config.engine().clone()));
    Ok(SessionController::start(
        Box::new(rules),
        config.session().clone(),
        factory,
    ))
}
