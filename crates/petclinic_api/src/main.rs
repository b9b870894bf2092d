//! Pet Clinic REST API Server
//!
//! Main binary for running the API server in production or development.
//!
//! # Environment Variables
//!
//! - `PETCLINIC_CONFIG`: Path of a TOML configuration file (optional)
//! - `PETCLINIC_PROFILE`: `memory` (default) or `mysql`
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DATASOURCE_URL`, `DATASOURCE_USERNAME`, `DATASOURCE_PASSWORD`,
//!   `DATASOURCE_INITIALIZATION_MODE`: MySQL connection for the `mysql` profile
//! - `VETS_CACHE_TTL_SECS`, `VETS_CACHE_MAX_CAPACITY`: vet cache settings
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use petclinic_api::{AppConfig, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("Starting Pet Clinic API server");
    tracing::info!("Profile: {}", config.profile);
    if let Some(datasource) = &config.datasource {
        tracing::info!("Datasource: {:?}", datasource);
    }

    let app = Application::build(&config).await?;
    let result = app.server().serve().await;

    app.close().await;
    result
}
