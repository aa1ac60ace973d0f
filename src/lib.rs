use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::io::BufReader;

pub mod config;
pub mod error_log;
pub mod geo;
mod http;
pub mod messages;
pub mod notify;
pub mod proxy;
pub mod report;
pub mod system_info;
pub mod ui;

pub use config::{Config, ConfigError, Endpoints};
pub use error_log::ErrorLog;
pub use geo::{extract_ip, GeoClient, GeoReport};
pub use notify::Notifier;
pub use proxy::{ProxyClient, ProxyVerdict};
pub use report::{Report, Reporter};
pub use system_info::{runtime_version, SystemFacts};

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG during local development)
    dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting {}", runtime_version());

    run_with(config::DEFAULT_CONFIG_PATH, ErrorLog::default()).await
}

/// Load the token file and serve the terminal session on stdin/stdout.
///
/// The configuration is checked before anything else, so a bad token file
/// ends the process without a single network request.
pub async fn run_with(config_path: impl AsRef<Path>, error_log: ErrorLog) -> Result<()> {
    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Cannot start without a complete token file");
            return Err(err.into());
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let reporter = Arc::new(Reporter::new(&config, error_log));
    ui::run_session(
        reporter,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        tokio::io::stderr(),
    )
    .await
}
