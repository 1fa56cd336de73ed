//! State-change events and the publisher seam.
//!
//! Every mutation the coordinator applies produces one or more
//! [`StateEvent`] values describing what observers need to redraw. The
//! [`EventPublisher`] trait abstracts the mechanism by which events reach
//! observers -- a broadcast channel in the server, a recording stub in
//! tests. The core never depends on a concrete transport.
//!
//! Publishing is fire-and-forget from the coordinator's point of view: a
//! slow or absent observer must never block or slow state mutation, so
//! `publish` is infallible and must not wait.

use serde::{Deserialize, Serialize};

use greenwave_types::{Signal, Vehicle};

/// An observer-visible state change.
///
/// Serialized as a tagged JSON object (`{"type": ..., "data": ...}`) so
/// dashboard clients can dispatch on the `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum StateEvent {
    /// One vehicle's record changed (position, telemetry, or route).
    VehicleChanged(Vehicle),
    /// The whole active vehicle set changed (clear-all, initial snapshot).
    AllVehiclesChanged(Vec<Vehicle>),
    /// One or more signal colors changed (evaluation pass or override).
    AllSignalsChanged(Vec<Signal>),
}

/// A sink for observer-visible state events.
///
/// Implementations must be non-blocking: the coordinator calls `publish`
/// while holding the state lock, and fan-out backlog belongs to each
/// observer's own queue, not to the coordinator.
pub trait EventPublisher {
    /// Publish one event to all current observers.
    ///
    /// Having zero observers is normal and must not be treated as an
    /// error.
    fn publish(&self, event: StateEvent);
}

/// A publisher that discards every event.
///
/// Used in tests and anywhere the coordinator runs without observers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl NullPublisher {
    /// Create a new null publisher.
    pub const fn new() -> Self {
        Self
    }
}

impl EventPublisher for NullPublisher {
    fn publish(&self, _event: StateEvent) {}
}
