//! Observer HTTP server lifecycle management.
//!
//! Provides [`start_server`] which binds the address from the `observer`
//! configuration section and serves the corridor API until the process
//! is terminated.

use std::net::SocketAddr;
use std::sync::Arc;

use greenwave_core::ObserverConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Start the Observer HTTP server.
///
/// Binds to the configured address, builds the router over the shared
/// corridor state, and serves requests until the process is terminated.
/// Returns `Ok(())` on clean shutdown, or an error if binding or serving
/// fails.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server(config: &ObserverConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    // Deployment snapshot for the startup log line.
    let (signals, hospitals) = {
        let coordinator = state.coordinator.read().await;
        (coordinator.signals().len(), coordinator.hospitals().len())
    };

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, signals, hospitals, "Observer server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Errors that can occur when starting or running the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
