//! Proximity-triggered signal-state coordinator for the Greenwave system.
//!
//! This crate owns all mutable corridor state and the one genuine piece of
//! decision logic in the system: the hysteresis policy that clears traffic
//! signals ahead of a moving emergency vehicle (trigger GREEN inside
//! 0.5 km, release back to RED only beyond 1.0 km).
//!
//! # Modules
//!
//! - [`config`] -- Typed YAML configuration with built-in defaults.
//! - [`coordinator`] -- The central decision engine owning registry and
//!   tracker; all mutation is routed through it.
//! - [`error`] -- [`CoreError`], the crate-wide error taxonomy.
//! - [`events`] -- [`StateEvent`] and the [`EventPublisher`] seam that
//!   decouples the core from any broadcast transport.
//! - [`registry`] -- The fixed signal set with read and override access.
//! - [`tracker`] -- The live vehicle set with partial-field upserts.
//!
//! [`CoreError`]: error::CoreError
//! [`StateEvent`]: events::StateEvent
//! [`EventPublisher`]: events::EventPublisher

pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod registry;
pub mod tracker;

pub use config::{ConfigError, GreenwaveConfig, ObserverConfig, ProximityConfig};
pub use coordinator::{
    Coordinator, DestinationRef, NavigationOutcome, PositionOutcome, PositionReport,
    ResolvedDestination,
};
pub use error::CoreError;
pub use events::{EventPublisher, NullPublisher, StateEvent};
pub use registry::SignalRegistry;
pub use tracker::{VehicleTracker, VehicleUpdate};
