//! Wallet Demo Backend Binary
//!
//! Main entry point for the wallet demo backend service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
#[cfg(feature = "mocks")]
use cw_wallet_backend_lib::repository::MockRepository;
use cw_wallet_backend_lib::{
    api::create_app,
    config::Config,
    log::initialize_logging,
    repository::{Repository, WalletOperations},
    services::Services,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "wallet-backend")]
#[command(about = "Crypto Wallet Demo Backend Service", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    initialize_logging(config.log_format);
    info!("Starting wallet backend");
    info!("Server will run on {}:{}", config.host, config.port);

    let repository = create_repository(&config).await?;
    let services = Services::new(config.clone(), repository)?;

    // Start server
    let app = create_app(services);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("Failed to bind TCP listener")?;

    info!("Server listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn load_config() -> Result<Config> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => {
            debug!("No config file specified, using defaults");
            Config::default()
        }
    };

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    Ok(config)
}

async fn create_repository(config: &Config) -> Result<Arc<dyn WalletOperations>> {
    #[cfg(feature = "mocks")]
    {
        if config.database.mock_mode {
            info!("Using in-memory repository (mock_mode enabled)");
            return Ok(Arc::new(MockRepository::new()));
        }
    }

    let repository = Repository::new(&config.database.url)
        .await
        .context("Failed to create repository with database connection")?;

    // Test the connection
    repository
        .test_connection()
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("Connected to PostgreSQL database");
    Ok(Arc::new(repository))
}
