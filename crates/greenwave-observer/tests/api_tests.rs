//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use greenwave_core::{Coordinator, GreenwaveConfig, StateEvent};
use greenwave_observer::router::build_router;
use greenwave_observer::state::AppState;
use greenwave_observer::ws::initial_snapshot;
use serde_json::{json, Value};
use tower::ServiceExt;

/// State built from the default (Vijayawada) configuration.
fn default_state() -> Arc<AppState> {
    let coordinator = Coordinator::new(&GreenwaveConfig::default()).unwrap();
    Arc::new(AppState::new(coordinator))
}

/// State with a single junction at the canonical test position.
fn single_signal_state() -> Arc<AppState> {
    let yaml = r"
signals:
  - id: sig1
    name: Test Junction
    lat: 16.4971
    lng: 80.6517
";
    let config = GreenwaveConfig::parse(yaml).unwrap();
    let coordinator = Coordinator::new(&config).unwrap();
    Arc::new(AppState::new(coordinator))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let router = build_router(default_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_list_signals_default_deployment() {
    let router = build_router(default_state());

    let response = router
        .oneshot(Request::get("/api/signals").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let signals = json.as_array().unwrap();
    assert_eq!(signals.len(), 4);
    assert!(signals.iter().all(|s| s["color"] == "RED"));
    assert_eq!(signals[0]["id"], "SIG-BENZ");
}

#[tokio::test]
async fn test_list_hospitals() {
    let router = build_router(default_state());

    let response = router
        .oneshot(Request::get("/api/hospitals").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let hospitals = json.as_array().unwrap();
    assert_eq!(hospitals.len(), 3);
    assert_eq!(hospitals[0]["id"], "HOSP-RAMESH");
}

#[tokio::test]
async fn test_list_vehicles_initially_empty() {
    let router = build_router(default_state());

    let response = router
        .oneshot(Request::get("/api/vehicles").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json.as_array().is_some_and(Vec::is_empty));
}

#[tokio::test]
async fn test_report_at_junction_triggers_then_releases() {
    let state = single_signal_state();
    let router = build_router(Arc::clone(&state));

    // AMB-1 reports exactly at the junction: sig1 clears to GREEN.
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/vehicle/update",
            &json!({ "id": "AMB-1", "lat": 16.4971, "lng": 80.6517 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["accepted"], true);
    assert_eq!(json["triggered_signal"], "sig1");

    let signals = router
        .clone()
        .oneshot(Request::get("/api/signals").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(signals.into_body()).await;
    assert_eq!(json[0]["color"], "GREEN");

    // The next report is more than 1 km away: sig1 releases to RED.
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/vehicle/update",
            &json!({ "id": "AMB-1", "lat": 16.60, "lng": 80.80 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["triggered_signal"], Value::Null);

    let signals = router
        .oneshot(Request::get("/api/signals").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(signals.into_body()).await;
    assert_eq!(json[0]["color"], "RED");
}

#[tokio::test]
async fn test_first_report_without_coordinate_is_rejected() {
    let router = build_router(single_signal_state());

    let response = router
        .oneshot(post_json(
            "/api/vehicle/update",
            &json!({ "id": "AMB-1", "speed_kmh": 60.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_with_half_coordinate_is_rejected() {
    let router = build_router(single_signal_state());

    let response = router
        .oneshot(post_json(
            "/api/vehicle/update",
            &json!({ "id": "AMB-1", "lat": 16.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_navigate_to_hospital() {
    let router = build_router(default_state());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/driver/navigate",
            &json!({
                "vehicle_id": "AMB-1",
                "destination_id": "HOSP-RAMESH",
                "start_lat": 16.52,
                "start_lng": 80.66,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["route"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["destination"]["name"], "Ramesh Hospitals");

    // The vehicle is now tracked with the destination installed.
    let vehicles = router
        .oneshot(Request::get("/api/vehicles").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(vehicles.into_body()).await;
    assert_eq!(json[0]["id"], "AMB-1");
    assert_eq!(json[0]["destination"], "HOSP-RAMESH");
}

#[tokio::test]
async fn test_navigate_to_unknown_destination_is_404() {
    let router = build_router(default_state());

    let response = router
        .oneshot(post_json(
            "/api/driver/navigate",
            &json!({
                "vehicle_id": "AMB-1",
                "destination_id": "HOSP-NOPE",
                "start_lat": 16.52,
                "start_lng": 80.66,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_navigate_without_destination_is_400() {
    let router = build_router(default_state());

    let response = router
        .oneshot(post_json(
            "/api/driver/navigate",
            &json!({
                "vehicle_id": "AMB-1",
                "start_lat": 16.52,
                "start_lng": 80.66,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_override_sets_color_and_returns_signal_list() {
    let router = build_router(default_state());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/police/override",
            &json!({ "signal_id": "SIG-NTR", "color": "GREEN" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let overridden = json
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "SIG-NTR")
        .cloned()
        .unwrap();
    assert_eq!(overridden["color"], "GREEN");

    // The override is visible in the very next listing.
    let signals = router
        .oneshot(Request::get("/api/signals").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(signals.into_body()).await;
    let listed = json
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "SIG-NTR")
        .cloned()
        .unwrap();
    assert_eq!(listed["color"], "GREEN");
}

#[tokio::test]
async fn test_override_unknown_signal_is_404() {
    let router = build_router(default_state());

    let response = router
        .oneshot(post_json(
            "/api/police/override",
            &json!({ "signal_id": "SIG-NOPE", "color": "GREEN" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_vehicles_empties_the_set() {
    let router = build_router(default_state());

    router
        .clone()
        .oneshot(post_json(
            "/api/vehicle/update",
            &json!({ "id": "AMB-1", "lat": 16.5, "lng": 80.6 }),
        ))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/vehicles/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let vehicles = router
        .oneshot(Request::get("/api/vehicles").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(vehicles.into_body()).await;
    assert!(json.as_array().is_some_and(Vec::is_empty));
}

#[tokio::test]
async fn test_position_report_reaches_subscribers() {
    let state = single_signal_state();
    let mut rx = state.subscribe();
    let router = build_router(Arc::clone(&state));

    router
        .oneshot(post_json(
            "/api/vehicle/update",
            &json!({ "id": "AMB-1", "lat": 16.4971, "lng": 80.6517 }),
        ))
        .await
        .unwrap();

    // The report publishes the changed vehicle, then the signal list.
    let first = rx.recv().await.unwrap();
    assert!(matches!(first, StateEvent::VehicleChanged(v) if v.id.as_str() == "AMB-1"));

    let second = rx.recv().await.unwrap();
    assert!(matches!(
        second,
        StateEvent::AllSignalsChanged(signals)
            if signals.iter().any(|s| s.color.is_green())
    ));
}

#[tokio::test]
async fn test_initial_snapshot_with_zero_vehicles() {
    let state = default_state();

    let [signals, vehicles] = initial_snapshot(&state).await;

    // Never omitted, even before anything has changed: the full default
    // registry (all RED) and the empty vehicle list.
    assert!(matches!(
        signals,
        StateEvent::AllSignalsChanged(s)
            if s.len() == 4 && s.iter().all(|signal| !signal.color.is_green())
    ));
    assert!(matches!(
        vehicles,
        StateEvent::AllVehiclesChanged(v) if v.is_empty()
    ));
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let router = build_router(default_state());

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
