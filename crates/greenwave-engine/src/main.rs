//! Engine entry point for the Greenwave corridor coordinator.
//!
//! Loads configuration, builds the proximity coordinator, and serves the
//! Observer API (REST + `WebSocket`) until the process receives Ctrl-C.
//!
//! # Configuration
//!
//! Set `GREENWAVE_CONFIG` to a YAML file path to override the built-in
//! pilot deployment defaults. `RUST_LOG` overrides the configured
//! tracing filter.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use greenwave_core::{Coordinator, GreenwaveConfig};
use greenwave_observer::startup::spawn_observer;
use greenwave_observer::state::AppState;

/// Environment variable naming the YAML configuration file.
const CONFIG_ENV: &str = "GREENWAVE_CONFIG";

/// Application entry point.
///
/// Initializes logging, loads configuration, constructs the coordinator
/// and shared state, then runs the Observer server until terminated.
///
/// # Errors
///
/// Returns an error if configuration loading or server startup fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so its logging filter can seed tracing.
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => GreenwaveConfig::from_file(&PathBuf::from(path))?,
        None => GreenwaveConfig::default(),
    };

    // Initialize structured logging; RUST_LOG wins over the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.clone())),
        )
        .with_target(true)
        .init();

    info!("greenwave-engine starting");
    info!(
        signals = config.signals.len(),
        hospitals = config.hospitals.len(),
        trigger_km = config.proximity.trigger_km,
        release_km = config.proximity.release_km,
        "configuration loaded"
    );

    let coordinator = Coordinator::new(&config)?;
    let state = Arc::new(AppState::new(coordinator));

    let server = spawn_observer(config.observer, Arc::clone(&state))?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, stopping");
    server.abort();

    Ok(())
}
