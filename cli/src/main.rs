//! Staffdesk - CLI server
//!
//! Headless staff directory service suitable for a systemd unit, a
//! container or a standalone process.
//!
//! ```sh
//! # Default config (~/.config/staffdesk/config.toml)
//! staffdesk
//!
//! # Custom config path
//! staffdesk --config /etc/staffdesk/config.toml
//!
//! # Override port and log level
//! staffdesk --api-port 8080 --log-level debug
//!
//! # Validate config without starting
//! staffdesk --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use staffdesk::config::AppConfig;
use staffdesk::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "staffdesk",
    version,
    about = "Department and employee directory REST service",
    long_about = "Staffdesk - REST API for departments and employees with \
                  bearer-token sessions.\n\n\
                  Default config: ~/.config/staffdesk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STAFFDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen host.
    #[arg(long)]
    api_host: Option<String>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the log format (text, json).
    #[arg(long)]
    log_format: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Do not install the Prometheus recorder or expose /metrics.
    #[arg(long)]
    no_metrics: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.api_host {
            config.server.api_host = host.clone();
        }
        if let Some(port) = self.api_port {
            config.server.api_port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(staffdesk::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };
    cli.apply_overrides(&mut config);
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Token TTL   : {}h", config.security.jwt_expiration_hours);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        enable_metrics: !cli.no_metrics,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.wait().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from(["staffdesk", "--api-port", "8080", "--log-level", "debug"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.api_port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.api_host, "0.0.0.0");
    }

    #[test]
    fn flags_default_to_off() {
        let cli = Cli::parse_from(["staffdesk"]);
        assert!(!cli.check);
        assert!(!cli.no_migrate);
        assert!(!cli.no_metrics);
    }
}
