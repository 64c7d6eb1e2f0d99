#![allow(non_snake_case)]

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use coinEventBot::cli;
use coinEventBot::config::{AppConfig, RunMode, Settings};
use coinEventBot::runtime;
use coinEventBot::service::calendar_service::{CalendarClient, CoindarService};
use coinEventBot::service::reference_cache::ReferenceCache;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(error = %err, "Unable to load config file");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => AppConfig::default(),
    };
    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Initializing...");
    let calendar: Arc<dyn CalendarClient> = Arc::new(CoindarService::new(
        &settings.coindar_base_url,
        &settings.coindar_token,
    ));
    let cache = Arc::new(ReferenceCache::new());
    if let Err(err) = cache.refresh(calendar.as_ref()).await {
        tracing::error!(error = %err, "Unable to load coins and tags");
        return ExitCode::FAILURE;
    }
    tracing::info!("Initialization done.");

    match settings.run_mode {
        RunMode::Bot => {
            if let Err(err) = runtime::run_bot(
                &settings.discord_token,
                &settings.command_prefix,
                cache,
                calendar,
            )
            .await
            {
                tracing::error!(error = %err, "Client error");
                return ExitCode::FAILURE;
            }
        }
        RunMode::Cli => cli::cli(&settings.command_prefix, cache, calendar).await,
    }
    ExitCode::SUCCESS
}
