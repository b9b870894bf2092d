//! Suite-scoped test environment
//!
//! One MySQL container is started per suite. The application is assembled
//! against it with the vet repository observed through a
//! [`CountingVetRepository`] placed under the cache, and the HTTP server is
//! bound to an ephemeral port. [`TestEnvironment::run`] releases everything
//! after the scenarios finish, including when one of them panics.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::future::{BoxFuture, FutureExt};
use petclinic_api::{ApiConfig, ApiServer, AppState, RunningServer};
use petclinic_core::{CacheConfig, CachedVetRepository};
use petclinic_db::{MySqlOwnerRepository, MySqlPool, MySqlVetRepository};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{container::MySqlFixture, counting::CountingVetRepository};

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;

/// Vet repository stack used by the suite: MySQL, counted, cached.
pub type ObservedVets = CachedVetRepository<CountingVetRepository<MySqlVetRepository>>;

/// Initialize tracing for tests. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Run `scenarios` against a suite-scoped environment.
///
/// - `acquire` failing skips the suite with a warning. It is the only step
///   allowed to do so.
/// - `boot` turns the acquired resource into the environment. It releases the
///   resource itself when it fails, and its error fails the suite.
/// - `release` always runs once `boot` succeeded. A panic inside `scenarios`
///   is resumed after it.
pub async fn run_scoped<R, E, A, B, BF, S, L, LF>(
    acquire: A,
    boot: B,
    scenarios: S,
    release: L,
) -> Result<()>
where
    A: Future<Output = Result<R>>,
    B: FnOnce(R) -> BF,
    BF: Future<Output = Result<E>>,
    S: for<'a> FnOnce(&'a E) -> BoxFuture<'a, Result<()>>,
    L: FnOnce(E) -> LF,
    LF: Future<Output = Result<()>>,
{
    let resource = match acquire.await {
        Ok(resource) => resource,
        Err(e) => {
            tracing::warn!("Skipping scenarios: {:#}", e);
            eprintln!("Skipping scenarios: {:#}", e);
            return Ok(());
        }
    };

    let env = boot(resource)
        .await
        .context("Test environment setup failed")?;

    let outcome = AssertUnwindSafe(scenarios(&env)).catch_unwind().await;

    if let Err(e) = release(env).await {
        tracing::warn!("Failed to release test environment: {:#}", e);
    }

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Container, application and HTTP client for one suite run.
pub struct TestEnvironment {
    fixture: MySqlFixture,
    pool: MySqlPool,
    vets: Arc<ObservedVets>,
    server: RunningServer,
    client: reqwest::Client,
}

impl TestEnvironment {
    /// Start the container, initialize the schema and boot the server.
    pub async fn start() -> Result<Self> {
        Self::boot(MySqlFixture::start().await?).await
    }

    /// Boot the application against a running container.
    ///
    /// The container is removed when booting fails.
    pub async fn boot(fixture: MySqlFixture) -> Result<Self> {
        match Self::wire(&fixture).await {
            Ok((pool, vets, server)) => Ok(Self {
                fixture,
                pool,
                vets,
                server,
                client: reqwest::Client::new(),
            }),
            Err(e) => {
                if let Err(release_error) = fixture.release().await {
                    tracing::warn!("Failed to release container: {:#}", release_error);
                }
                Err(e)
            }
        }
    }

    async fn wire(
        fixture: &MySqlFixture,
    ) -> Result<(MySqlPool, Arc<ObservedVets>, RunningServer)> {
        let datasource = fixture.datasource_config();
        let pool = fixture.wait_until_ready().await?;

        petclinic_db::initialize_schema(&pool, datasource.initialization_mode)
            .await
            .context("Schema initialization failed")?;

        let vets = Arc::new(CachedVetRepository::new(
            CountingVetRepository::new(MySqlVetRepository::new(pool.clone())),
            &CacheConfig::default(),
        ));
        let owners = Arc::new(MySqlOwnerRepository::new(pool.clone()));
        let state = AppState::new(owners, vets.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let server = ApiServer::new(ApiConfig::default(), state).spawn(listener)?;

        tracing::info!("Test server listening on {}", server.base_url());

        Ok((pool, vets, server))
    }

    /// Run `scenarios` against a fresh environment, then release it.
    ///
    /// Only a container that cannot be started (no Docker) skips the
    /// scenarios. Any later setup failure fails them.
    pub async fn run<F>(scenarios: F) -> Result<()>
    where
        F: for<'a> FnOnce(&'a TestEnvironment) -> BoxFuture<'a, Result<()>>,
    {
        init_tracing();

        run_scoped(MySqlFixture::start(), Self::boot, scenarios, Self::release).await
    }

    pub fn fixture(&self) -> &MySqlFixture {
        &self.fixture
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// The cached, counted vet repository the server uses.
    pub fn vets(&self) -> &ObservedVets {
        &self.vets
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Absolute URL for `path` on the test server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url(), path)
    }

    /// Shut down the server, close the pool and remove the container.
    pub async fn release(self) -> Result<()> {
        let server_result = self.server.shutdown().await;
        self.pool.close().await;
        self.fixture.release().await?;
        server_result
    }
}
