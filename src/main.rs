use anyhow::Result;
use aws_config::BehaviorVersion;
use dyncrab::{AppState, Config, Route53ZoneService, SharedConfig, SsmSecretStore};
use is_terminal::IsTerminal;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = config_init(std::env::args().nth(1))?;

    let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let state = AppState::new(
        config.clone(),
        Arc::new(SsmSecretStore::new(&sdk_config)),
        Arc::new(Route53ZoneService::new(&sdk_config)),
    );

    tracing::info!(
        "updating \"{}\" in zone {}",
        &config.dns_dyn_record_name,
        &config.dns_hosted_zone
    );
    tracing::info!("API listening on {}", &config.api_bind_addr);
    dyncrab::new_http(state, shutdown_signal()).await?;

    tracing::info!("goodbye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("unable to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("quitting from signal");
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dyncrab=info,tower_http=info".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<SharedConfig> {
    let config = match config_file {
        None => {
            tracing::debug!("loading config from environment");
            Config::try_from_env()?
        }
        Some(config_file) => {
            tracing::debug!("loading config from {config_file}");
            Config::try_from_file(&config_file)?
        }
    };
    Ok(Arc::new(config))
}
