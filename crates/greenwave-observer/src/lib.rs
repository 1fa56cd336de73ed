//! Observer API server for the Greenwave corridor system.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/updates`) for real-time state
//!   streaming via [`tokio::sync::broadcast`], with a full snapshot
//!   pushed to every newly connected observer
//! - **Command endpoints** for position reports, navigation starts,
//!   manual signal overrides, and the administrative clear-all
//! - **Query endpoints** for the signal registry, the hospital catalog,
//!   and the tracked vehicle set
//! - **Minimal HTML status page** (`GET /`) with live counts and an
//!   endpoint index
//!
//! # Architecture
//!
//! All mutable state lives in a single [`Coordinator`] behind one
//! exclusive lock, so an evaluation pass is atomic over the whole signal
//! set. Broadcast fan-out is decoupled from mutation: the coordinator
//! publishes into a broadcast channel and each `WebSocket` client drains
//! its own receiver, so a slow observer's backlog never slows a position
//! report.
//!
//! [`Coordinator`]: greenwave_core::Coordinator

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::{AppState, ChannelPublisher};
