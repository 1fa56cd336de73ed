//! REST API endpoint handlers for the Observer server.
//!
//! Command handlers take the coordinator write lock for exactly one
//! mutation and publish the resulting state events through the broadcast
//! channel; query handlers take the read lock and serve current state.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/signals` | Signal registry in registration order |
//! | `GET` | `/api/hospitals` | Static hospital catalog |
//! | `GET` | `/api/vehicles` | Tracked vehicle set |
//! | `POST` | `/api/vehicle/update` | Vehicle position report |
//! | `POST` | `/api/driver/navigate` | Start navigation for a vehicle |
//! | `POST` | `/api/police/override` | Manual signal override |
//! | `POST` | `/api/vehicles/clear` | Clear the tracked vehicle set |

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};

use greenwave_core::{DestinationRef, PositionReport, ResolvedDestination};
use greenwave_types::{Coordinate, Signal, SignalColor, SignalId, Telemetry, VehicleId};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Body of `POST /api/vehicle/update`.
///
/// `lat`/`lng` may be omitted for a vehicle that is already tracked (a
/// telemetry-only update); a first sighting without them is rejected.
#[derive(Debug, Deserialize)]
pub struct PositionUpdateRequest {
    /// Reporting vehicle ID.
    pub id: String,
    /// Reported latitude.
    pub lat: Option<f64>,
    /// Reported longitude.
    pub lng: Option<f64>,
    /// Estimated minutes to destination.
    pub eta_minutes: Option<f64>,
    /// Current speed in km/h.
    pub speed_kmh: Option<f64>,
    /// Remaining distance in km.
    pub distance_km: Option<f64>,
    /// Destination reference carried with the report.
    pub destination: Option<String>,
}

/// Acknowledgment for a position report.
#[derive(Debug, Serialize)]
pub struct PositionUpdateResponse {
    /// Whether the report was applied.
    pub accepted: bool,
    /// One signal cleared to GREEN by this report, if any.
    pub triggered_signal: Option<SignalId>,
}

/// Body of `POST /api/driver/navigate`.
///
/// The destination is either a catalog reference (`destination_id`, a
/// hospital or signal ID) or an ad-hoc named coordinate
/// (`destination_name` + `destination_lat` + `destination_lng`).
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// The navigating vehicle.
    pub vehicle_id: String,
    /// Catalog destination reference.
    pub destination_id: Option<String>,
    /// Ad-hoc destination name.
    pub destination_name: Option<String>,
    /// Ad-hoc destination latitude.
    pub destination_lat: Option<f64>,
    /// Ad-hoc destination longitude.
    pub destination_lng: Option<f64>,
    /// Origin latitude.
    pub start_lat: f64,
    /// Origin longitude.
    pub start_lng: f64,
}

/// Response for a navigation start.
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    /// The placeholder route (origin, midpoint, destination).
    pub route: Vec<Coordinate>,
    /// The resolved destination.
    pub destination: ResolvedDestination,
}

/// Body of `POST /api/police/override`.
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    /// The signal to override.
    pub signal_id: String,
    /// The color to set unconditionally.
    pub color: SignalColor,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let coordinator = state.coordinator.read().await;
    let signal_count = coordinator.signals().len();
    let green_count = coordinator
        .signals()
        .iter()
        .filter(|s| s.color.is_green())
        .count();
    let vehicle_count = coordinator.vehicles().len();
    let hospital_count = coordinator.hospitals().len();
    drop(coordinator);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Greenwave Observer</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #3fb950; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #3fb950; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Greenwave Observer</h1>
    <p class="subtitle">Emergency corridor coordination server</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Signals</div>
            <div class="value">{signal_count}</div>
        </div>
        <div class="metric">
            <div class="label">Green</div>
            <div class="value">{green_count}</div>
        </div>
        <div class="metric">
            <div class="label">Vehicles</div>
            <div class="value">{vehicle_count}</div>
        </div>
        <div class="metric">
            <div class="label">Hospitals</div>
            <div class="value">{hospital_count}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET <a href="/api/signals">/api/signals</a> -- Signal registry</li>
        <li>GET <a href="/api/hospitals">/api/hospitals</a> -- Hospital catalog</li>
        <li>GET <a href="/api/vehicles">/api/vehicles</a> -- Tracked vehicles</li>
        <li>POST /api/vehicle/update -- Position report</li>
        <li>POST /api/driver/navigate -- Start navigation</li>
        <li>POST /api/police/override -- Manual signal override</li>
        <li>POST /api/vehicles/clear -- Clear the vehicle set</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/updates</code> -- Live state event stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Query endpoints
// ---------------------------------------------------------------------------

/// Return the signal registry in registration order.
pub async fn list_signals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let coordinator = state.coordinator.read().await;
    Json(coordinator.signals().to_vec())
}

/// Return the static hospital catalog.
pub async fn list_hospitals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let coordinator = state.coordinator.read().await;
    Json(coordinator.hospitals().to_vec())
}

/// Return the currently tracked vehicle set in insertion order.
pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let coordinator = state.coordinator.read().await;
    Json(coordinator.vehicles().to_vec())
}

// ---------------------------------------------------------------------------
// POST /api/vehicle/update -- position report
// ---------------------------------------------------------------------------

/// Ingest a vehicle position report and run the evaluation pass.
///
/// Creates the vehicle on first sighting (coordinate required), then
/// evaluates every signal against the reported position. Publishes
/// `vehicle-changed` and `all-signals-changed` to observers.
pub async fn update_position(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PositionUpdateRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let coordinate = match (request.lat, request.lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        (None, None) => None,
        _ => {
            return Err(ObserverError::InvalidInput(String::from(
                "lat and lng must be provided together",
            )))
        }
    };

    let report = PositionReport {
        vehicle_id: VehicleId::new(request.id),
        coordinate,
        destination: request.destination,
        telemetry: Telemetry {
            eta_minutes: request.eta_minutes,
            speed_kmh: request.speed_kmh,
            distance_km: request.distance_km,
        },
    };

    let mut coordinator = state.coordinator.write().await;
    let outcome = coordinator.report_position(report, &state.publisher())?;

    Ok(Json(PositionUpdateResponse {
        accepted: true,
        triggered_signal: outcome.triggered,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/driver/navigate -- start navigation
// ---------------------------------------------------------------------------

/// Start navigation for a vehicle towards a hospital, a signal, or an
/// ad-hoc coordinate.
///
/// Responds with the placeholder route and the resolved destination, or
/// 404 if a catalog reference cannot be resolved.
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NavigateRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let destination = match (
        request.destination_id,
        request.destination_name,
        request.destination_lat,
        request.destination_lng,
    ) {
        (Some(id), _, _, _) => DestinationRef::Catalog(id),
        (None, Some(name), Some(lat), Some(lng)) => DestinationRef::Adhoc {
            name,
            coordinate: Coordinate::new(lat, lng),
        },
        _ => {
            return Err(ObserverError::InvalidInput(String::from(
                "either destination_id or destination_name with coordinates is required",
            )))
        }
    };

    let origin = Coordinate::new(request.start_lat, request.start_lng);
    let vehicle_id = VehicleId::new(request.vehicle_id);

    let mut coordinator = state.coordinator.write().await;
    let outcome = coordinator.start_navigation(&vehicle_id, destination, origin, &state.publisher())?;

    Ok(Json(NavigateResponse {
        route: outcome.route,
        destination: outcome.destination,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/police/override -- manual signal override
// ---------------------------------------------------------------------------

/// Set a signal's color unconditionally and return the full updated
/// signal list.
///
/// The override bypasses the proximity policy but does not suppress it:
/// the next qualifying position report can flip the signal again.
pub async fn override_signal(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OverrideRequest>,
) -> Result<Json<Vec<Signal>>, ObserverError> {
    let id = SignalId::new(request.signal_id);

    let mut coordinator = state.coordinator.write().await;
    coordinator.override_signal(&id, request.color, &state.publisher())?;

    Ok(Json(coordinator.signals().to_vec()))
}

// ---------------------------------------------------------------------------
// POST /api/vehicles/clear -- administrative clear-all
// ---------------------------------------------------------------------------

/// Remove every tracked vehicle.
///
/// The only removal path for vehicles; there is no per-vehicle removal
/// and no automatic expiry. Publishes an empty `all-vehicles-changed`.
pub async fn clear_vehicles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut coordinator = state.coordinator.write().await;
    coordinator.clear_vehicles(&state.publisher());
    StatusCode::NO_CONTENT
}
