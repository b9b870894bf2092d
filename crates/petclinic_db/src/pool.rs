//! Connection pool construction.

use std::str::FromStr;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::{DataSourceConfig, DbError, DbResult};

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;

/// Build driver connect options from a datasource config.
pub fn connect_options(config: &DataSourceConfig) -> DbResult<MySqlConnectOptions> {
    let mut options =
        MySqlConnectOptions::from_str(config.driver_url()).map_err(|source| {
            DbError::InvalidUrl {
                url: config.url.clone(),
                source,
            }
        })?;

    if let Some(username) = &config.username {
        options = options.username(username);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }

    Ok(options)
}

/// Open a connection pool and verify it with one connection.
pub async fn connect(config: &DataSourceConfig) -> DbResult<MySqlPool> {
    let options = connect_options(config)?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Connecting to MySQL"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run a trivial query to check the server answers.
pub async fn ping(pool: &MySqlPool) -> DbResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
