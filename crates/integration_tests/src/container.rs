//! MySQL container fixture
//!
//! Starts a throwaway `mysql:8.0` server with testcontainers and turns its
//! mapped address into a [`DataSourceConfig`] for the application.

use anyhow::{Context, Result};
use petclinic_db::{DataSourceConfig, InitializationMode, MySqlPool};
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;
use tokio::time::sleep;

/// Image tag of the MySQL server.
pub const MYSQL_TAG: &str = "8.0";

/// Database created by the image on first start.
pub const MYSQL_DATABASE: &str = "test";

pub const MYSQL_USER: &str = "petclinic";
pub const MYSQL_PASSWORD: &str = "petclinic";

const MYSQL_PORT: u16 = 3306;

/// Attempts made while waiting for the server to accept connections.
pub const READY_ATTEMPTS: u32 = 30;

/// Pause between readiness attempts.
pub const READY_DELAY: Duration = Duration::from_secs(1);

/// A running MySQL container.
pub struct MySqlFixture {
    container: ContainerAsync<Mysql>,
    host: String,
    port: u16,
}

impl MySqlFixture {
    /// Start the container and resolve its mapped address.
    ///
    /// Fails when Docker is unavailable or the image cannot be started.
    pub async fn start() -> Result<Self> {
        tracing::info!("Starting mysql:{} container...", MYSQL_TAG);

        let container = Mysql::default()
            .with_tag(MYSQL_TAG)
            .with_env_var("MYSQL_USER", MYSQL_USER)
            .with_env_var("MYSQL_PASSWORD", MYSQL_PASSWORD)
            .start()
            .await
            .context("Failed to start MySQL container (is Docker running?)")?;

        let host = container
            .get_host()
            .await
            .context("Failed to resolve container host")?
            .to_string();
        let port = container
            .get_host_port_ipv4(MYSQL_PORT)
            .await
            .context("Failed to resolve mapped MySQL port")?;

        tracing::info!(host = %host, port, "MySQL container started");

        Ok(Self {
            container,
            host,
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        MYSQL_USER
    }

    pub fn password(&self) -> &str {
        MYSQL_PASSWORD
    }

    /// `mysql://host:port/test`, without credentials.
    pub fn url(&self) -> String {
        format!("mysql://{}:{}/{}", self.host, self.port, MYSQL_DATABASE)
    }

    /// Datasource settings for this container, initializing the schema on
    /// every boot.
    pub fn datasource_config(&self) -> DataSourceConfig {
        DataSourceConfig::new(self.url())
            .with_credentials(self.username(), self.password())
            .with_initialization_mode(InitializationMode::Always)
    }

    /// Wait until the server answers `SELECT 1`, returning a connected pool.
    ///
    /// Tries [`READY_ATTEMPTS`] times, [`READY_DELAY`] apart.
    pub async fn wait_until_ready(&self) -> Result<MySqlPool> {
        let mut config = self.datasource_config();
        config.acquire_timeout_secs = 5;

        let mut last_error = None;
        for attempt in 1..=READY_ATTEMPTS {
            match petclinic_db::connect(&config).await {
                Ok(pool) => match petclinic_db::ping(&pool).await {
                    Ok(()) => {
                        tracing::info!("✓ MySQL is ready (attempt {})", attempt);
                        return Ok(pool);
                    }
                    Err(e) => {
                        tracing::debug!("Ping failed: {} (attempt {})", e, attempt);
                        pool.close().await;
                        last_error = Some(e);
                    }
                },
                Err(e) => {
                    tracing::debug!("Connect failed: {} (attempt {})", e, attempt);
                    last_error = Some(e);
                }
            }
            sleep(READY_DELAY).await;
        }

        match last_error {
            Some(e) => Err(anyhow::Error::new(e).context(format!(
                "MySQL not ready after {} attempts",
                READY_ATTEMPTS
            ))),
            None => anyhow::bail!("MySQL not ready after {} attempts", READY_ATTEMPTS),
        }
    }

    /// Stop and remove the container.
    pub async fn release(self) -> Result<()> {
        tracing::info!("Removing MySQL container");
        self.container
            .rm()
            .await
            .context("Failed to remove MySQL container")
    }
}
