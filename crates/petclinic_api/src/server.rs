//! HTTP server configuration and startup
//!
//! This module provides the main server configuration and startup logic.
//! [`ApiServer::serve`] runs until the process is signalled;
//! [`ApiServer::spawn`] runs on a caller supplied listener in the background
//! and is what tests use to get a server on an ephemeral port.

use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{routes, AppState, DEFAULT_PORT};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl ApiConfig {
    /// Socket address built from host and port.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip = self
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid host '{}': {}", self.host, e))?;
        Ok(SocketAddr::from((ip, self.port)))
    }
}

/// API server
pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server with the given configuration.
    pub fn new(config: ApiConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the Axum router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    /// Start the server and listen for requests.
    ///
    /// This method blocks until the server is shut down gracefully via
    /// CTRL+C (SIGINT) or SIGTERM signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr()?;

        tracing::info!("Starting API server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        let app = self.router();

        // Serve with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener in a background task.
    ///
    /// Bind to port 0 to let the OS pick a free port; the chosen address is
    /// available from [`RunningServer::local_addr`]. The configured host and
    /// port are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener's local address cannot be read.
    pub fn spawn(self, listener: TcpListener) -> anyhow::Result<RunningServer> {
        let addr = listener.local_addr()?;
        let app = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tracing::info!("Spawning API server on {}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also stops the server
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(RunningServer {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        })
    }
}

/// Handle to a server started with [`ApiServer::spawn`].
pub struct RunningServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://` URL of the server, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the server task failed or panicked.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        self.handle
            .await
            .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        tracing::info!("Server on {} shut down", self.addr);
        Ok(())
    }
}

/// Wait for shutdown signal (CTRL+C or SIGTERM)
///
/// This function waits for either:
/// - CTRL+C (SIGINT) on all platforms
/// - SIGTERM on Unix platforms
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
