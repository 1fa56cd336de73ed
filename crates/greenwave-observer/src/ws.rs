//! `WebSocket` handler for real-time state streaming.
//!
//! Clients connect to `GET /ws/updates` and receive JSON-encoded
//! [`StateEvent`] messages whenever vehicle or signal state changes.
//! Immediately on connection the handler pushes a full snapshot --
//! `all-signals-changed` with the current registry and
//! `all-vehicles-changed` with the current active set (an empty list if
//! none) -- so a new observer never starts blind, even if nothing has
//! changed yet.
//!
//! Events of a given kind are delivered in publish order (FIFO per
//! observer). If a client falls behind, lagged messages are silently
//! skipped and the client resumes from the most recent state.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use greenwave_core::StateEvent;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming state events.
///
/// # Route
///
/// `GET /ws/updates`
pub async fn ws_updates(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Build the initial snapshot pushed to a newly connected observer.
///
/// Always two events: the full signal list, then the full vehicle list
/// (empty included). Exposed for the integration tests.
pub async fn initial_snapshot(state: &AppState) -> [StateEvent; 2] {
    let coordinator = state.coordinator.read().await;
    [
        StateEvent::AllSignalsChanged(coordinator.signals().to_vec()),
        StateEvent::AllVehiclesChanged(coordinator.vehicles().to_vec()),
    ]
}

/// Handle the `WebSocket` lifecycle: push the initial snapshot, then
/// subscribe to the broadcast channel and forward each state event as a
/// text frame.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket observer connected");

    // Subscribe before reading the snapshot so no event published in
    // between is lost; at worst the client sees one state twice.
    let mut rx = state.subscribe();

    for event in initial_snapshot(&state).await {
        if send_event(&mut socket, &event).await.is_err() {
            debug!("WebSocket observer disconnected during snapshot");
            return;
        }
    }

    loop {
        tokio::select! {
            // Receive a state event from the coordinator.
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            debug!("WebSocket observer disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket observer lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket observer disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("WebSocket observer disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore other message types (text, binary from client).
                    }
                }
            }
        }
    }
}

/// Serialize one event and send it as a text frame.
async fn send_event(socket: &mut WebSocket, event: &StateEvent) -> Result<(), ()> {
    let json = match serde_json::to_string(event) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize state event: {e}");
            return Ok(());
        }
    };
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}
