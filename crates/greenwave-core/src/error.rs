//! Error types for the `greenwave-core` crate.
//!
//! All fallible operations in this crate return [`CoreError`] through the
//! standard [`Result`] type alias. Every error is local to a single
//! request: a failed operation leaves state unchanged and the coordinator
//! keeps serving subsequent requests.

use greenwave_types::{SignalId, VehicleId};

/// Errors that can occur during coordinator operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A signal ID was not found in the registry.
    #[error("signal not found: {0}")]
    SignalNotFound(SignalId),

    /// A duplicate signal ID appeared in the configured signal set.
    #[error("duplicate signal id: {0}")]
    DuplicateSignal(SignalId),

    /// A vehicle's first sighting arrived without a coordinate.
    #[error("first report for vehicle {0} is missing a coordinate")]
    MissingCoordinate(VehicleId),

    /// A navigation destination could not be resolved against the
    /// hospital catalog or the signal registry.
    #[error("destination not found: {0}")]
    DestinationNotFound(String),
}
