use anyhow::Result;
use farmcart_core::{config::Config, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize logging and metrics
    let metrics_handle = telemetry::init(&config.telemetry);

    info!("Starting FarmCart Core");
    info!("HTTP server listening on {}", config.http_addr());

    // Run the server
    server::run(config, metrics_handle).await
}
