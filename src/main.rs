//! Staff service entry point.
//!
//! Reads configuration from `$STAFFDESK_CONFIG` or
//! `~/.config/staffdesk/config.toml`. The `cli` workspace member offers the
//! same server with command-line overrides.

use std::path::PathBuf;

use tracing::info;

use staffdesk::{default_config_path, init_tracing, AppConfig, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("STAFFDESK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = AppConfig::load(&config_path)?;
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shut down gracefully.");
    handle.wait().await;

    Ok(())
}
