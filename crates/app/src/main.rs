mod cli;
mod commands;
mod config;
mod http;
mod state;
mod wiring;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::{AppConfig, ConfigError};
use crate::http::HttpError;
use crate::wiring::WiringError;
use wishwall_client::ClientError;
use wishwall_infra::db::run_migrations;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("db error: {0}")]
    Db(#[from] wishwall_infra::db::DbPoolError),
    #[error("http error: {0}")]
    Http(#[from] HttpError),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    config::load_dotenv()?;
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Serve => serve(config).await?,
        Command::Wall { watch } => {
            let widget = wiring::build_widget(&config)?;
            commands::wall(&widget, &config, watch).await;
        }
        Command::Post {
            name,
            anonymous,
            text,
        } => {
            let widget = wiring::build_widget(&config)?;
            commands::post(&widget, &name, &text, anonymous).await?;
        }
        Command::Like { id } => {
            let widget = wiring::build_widget(&config)?;
            commands::like(&widget, &id).await?;
        }
        Command::ClearLikes => {
            let widget = wiring::build_widget(&config)?;
            commands::clear_likes(&widget).await?;
        }
    }
    Ok(())
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    let state = wiring::build_state(config)?;
    run_migrations(&state.db).await?;
    info!(database = %state.config.database_url, "migrations applied");

    let addr = state.config.http_addr;
    let api = tokio::spawn(async move {
        info!(%addr, "http server starting");
        http::serve(addr, state).await
    });

    tokio::select! {
        _ = commands::shutdown_signal() => {
            info!("shutdown signal received");
        }
        res = api => {
            res??;
        }
    }
    Ok(())
}
