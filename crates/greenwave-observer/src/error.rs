//! Error types for the Observer API server.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Core
//! errors map onto HTTP semantics: unknown signals and unresolvable
//! destinations are `NotFound`, a first sighting without a coordinate is
//! `InvalidInput`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use greenwave_core::CoreError;

/// Errors that can occur in the Observer API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was missing a required field or carried an invalid one.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ObserverError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::SignalNotFound(_) | CoreError::DestinationNotFound(_) => {
                Self::NotFound(error.to_string())
            }
            CoreError::MissingCoordinate(_) => Self::InvalidInput(error.to_string()),
            // Duplicate signals are a configuration-time failure; seeing
            // one here means the registry was built outside the loader.
            CoreError::DuplicateSignal(_) => Self::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
