//! Observer server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which launches the Observer HTTP +
//! `WebSocket` server on a background Tokio task. The engine binary
//! calls this during startup so the Observer API runs concurrently with
//! whatever else the process does (today: waiting for shutdown).

use std::sync::Arc;

use greenwave_core::ObserverConfig;
use tokio::task::JoinHandle;

use crate::server::ServerError;
use crate::state::AppState;

/// Errors that can occur when spawning the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the Observer HTTP server on a background Tokio task.
///
/// Binds to `{host}:{port}` and serves the REST API plus the `WebSocket`
/// endpoint for real-time state streaming. Returns a [`JoinHandle`] so
/// the caller can manage the server's lifecycle.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address is not
/// parseable. Bind failures surface asynchronously from the background
/// task and are logged there.
pub fn spawn_observer(
    config: ObserverConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task, so obvious misconfigurations fail fast.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let port = config.port;
    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(port, "Observer server spawned on background task");

    Ok(handle)
}
