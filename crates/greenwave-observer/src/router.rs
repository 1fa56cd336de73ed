//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/updates` -- `WebSocket` state event stream
/// - `GET /api/signals` -- signal registry
/// - `GET /api/hospitals` -- hospital catalog
/// - `GET /api/vehicles` -- tracked vehicle set
/// - `POST /api/vehicle/update` -- position report
/// - `POST /api/driver/navigate` -- navigation start
/// - `POST /api/police/override` -- manual override
/// - `POST /api/vehicles/clear` -- administrative clear-all
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/updates", get(ws::ws_updates))
        // Queries
        .route("/api/signals", get(handlers::list_signals))
        .route("/api/hospitals", get(handlers::list_hospitals))
        .route("/api/vehicles", get(handlers::list_vehicles))
        // Commands
        .route("/api/vehicle/update", post(handlers::update_position))
        .route("/api/driver/navigate", post(handlers::navigate))
        .route("/api/police/override", post(handlers::override_signal))
        .route("/api/vehicles/clear", post(handlers::clear_vehicles))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
