//! # Social Server
//!
//! Entry point: tracing, configuration, database pool, then the HTTP and
//! WebSocket server.

use anyhow::Result;
use tracing::info;

use social_server::config::Settings;
use social_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    social_server::telemetry::init_tracing();

    info!("Starting Social Server...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
