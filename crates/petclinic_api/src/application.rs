//! Application assembly
//!
//! Builds the repositories for the configured profile and hands them to the
//! HTTP layer as an [`AppState`]. Everything is constructed explicitly; the
//! test harness uses the same building blocks to insert its own decorators.

use std::sync::Arc;

use anyhow::Context;
use petclinic_core::{CacheConfig, CachedVetRepository};
use petclinic_db::{DataSourceConfig, MySqlOwnerRepository, MySqlPool, MySqlVetRepository};

use crate::{
    config::{AppConfig, ConfigError, Profile},
    server::ApiServer,
    AppState,
};

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;

/// Assembled application: shared state plus the resources it owns.
pub struct Application {
    config: AppConfig,
    state: AppState,
    pool: Option<MySqlPool>,
}

impl Application {
    /// Build storage for `config.profile`.
    ///
    /// The `mysql` profile connects to the datasource and runs schema
    /// initialization according to its initialization mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent, the database
    /// cannot be reached or the schema scripts fail.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let (state, pool) = match config.profile {
            Profile::Memory => {
                tracing::info!("Using in-memory storage");
                (AppState::in_memory(&config.cache), None)
            }
            Profile::Mysql => {
                let datasource = config
                    .datasource
                    .as_ref()
                    .ok_or(ConfigError::MissingDatasource(Profile::Mysql))?;
                let pool = open_datasource(datasource).await?;
                (mysql_state(pool.clone(), &config.cache), Some(pool))
            }
        };

        Ok(Self {
            config: config.clone(),
            state,
            pool,
        })
    }

    /// State shared by the request handlers.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Connection pool, for the `mysql` profile.
    pub fn pool(&self) -> Option<&MySqlPool> {
        self.pool.as_ref()
    }

    /// HTTP server over this application's state and server settings.
    pub fn server(&self) -> ApiServer {
        ApiServer::new(self.config.server.clone(), self.state())
    }

    /// Release owned resources.
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

/// Connect to `datasource` and initialize its schema.
pub async fn open_datasource(datasource: &DataSourceConfig) -> anyhow::Result<MySqlPool> {
    let pool = petclinic_db::connect(datasource)
        .await
        .with_context(|| format!("failed to connect to {}", datasource.driver_url()))?;

    let ran = petclinic_db::initialize_schema(&pool, datasource.initialization_mode)
        .await
        .context("schema initialization failed")?;

    tracing::info!(
        mode = %datasource.initialization_mode,
        scripts_ran = ran,
        "Datasource ready"
    );

    Ok(pool)
}

/// MySQL repositories over `pool`, with vets behind the cache.
pub fn mysql_state(pool: MySqlPool, cache: &CacheConfig) -> AppState {
    let owners = Arc::new(MySqlOwnerRepository::new(pool.clone()));
    let vets = CachedVetRepository::new(MySqlVetRepository::new(pool), cache);
    AppState::new(owners, Arc::new(vets))
}
