//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the coordinator behind a single exclusive lock and
//! the broadcast channel that fans state events out to every connected
//! `WebSocket` observer. Handlers take the write lock for the duration
//! of one mutation (an evaluation pass reads and writes the whole signal
//! set, so it must be atomic), publish through the channel, and release.

use std::sync::Arc;

use greenwave_core::{Coordinator, EventPublisher, StateEvent};
use tokio::sync::{broadcast, RwLock};

/// Capacity of the broadcast channel for state events.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// broadcast sender pushes [`StateEvent`]s to all connected `WebSocket`
/// clients; the coordinator lock serializes every mutating operation.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single owner of all mutable corridor state.
    pub coordinator: Arc<RwLock<Coordinator>>,
    /// Broadcast sender for observer state events.
    pub tx: broadcast::Sender<StateEvent>,
}

impl AppState {
    /// Create application state around a freshly built coordinator.
    pub fn new(coordinator: Coordinator) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            coordinator: Arc::new(RwLock::new(coordinator)),
            tx,
        }
    }

    /// Subscribe to the state event stream.
    ///
    /// Returns a receiver with its own queue; a lagging receiver skips
    /// ahead instead of slowing the publisher.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.tx.subscribe()
    }

    /// A publisher handle the coordinator can fan events out through.
    pub fn publisher(&self) -> ChannelPublisher {
        ChannelPublisher {
            tx: self.tx.clone(),
        }
    }
}

/// An [`EventPublisher`] backed by the observer broadcast channel.
///
/// Sending is non-blocking; each subscriber has its own bounded queue,
/// so a slow observer's backlog is its own problem, never the
/// coordinator's.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    tx: broadcast::Sender<StateEvent>,
}

impl EventPublisher for ChannelPublisher {
    fn publish(&self, event: StateEvent) {
        // send fails only when there are zero receivers, which is normal
        // when no observers are connected.
        drop(self.tx.send(event));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use greenwave_core::GreenwaveConfig;

    use super::*;

    fn make_state() -> AppState {
        let coordinator = Coordinator::new(&GreenwaveConfig::default()).unwrap();
        AppState::new(coordinator)
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let state = make_state();
        state
            .publisher()
            .publish(StateEvent::AllVehiclesChanged(Vec::new()));
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let state = make_state();
        let mut rx = state.subscribe();

        state
            .publisher()
            .publish(StateEvent::AllVehiclesChanged(Vec::new()));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, StateEvent::AllVehiclesChanged(v) if v.is_empty()));
    }
}
