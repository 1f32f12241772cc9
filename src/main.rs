//! Advisor gateway server binary

use advisor_gateway::config::Config;
use advisor_gateway::server::HttpServer;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> advisor_gateway::Result<()> {
    let config_path =
        std::env::var("ADVISOR_GATEWAY_CONFIG").unwrap_or_else(|_| "config/gateway.yaml".into());

    let config = if tokio::fs::try_exists(&config_path).await.unwrap_or(false) {
        Config::from_file(&config_path).await?
    } else {
        tracing::warn!("No config file at {config_path}, using defaults with env overrides");
        Config::from_env()?
    };

    let server = HttpServer::new(&config).await?;
    server.start().await
}
