//! Shared type definitions for the Greenwave corridor coordinator.
//!
//! This crate is the single source of truth for all types used across the
//! Greenwave workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the police and hospital observer dashboards.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for signal, vehicle, and hospital
//!   identifiers
//! - [`geo`] -- Geographic coordinates and great-circle distance
//! - [`enums`] -- The binary signal color state
//! - [`structs`] -- Core entity structs (signals, hospitals, vehicles)

pub mod enums;
pub mod geo;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::SignalColor;
pub use geo::{Coordinate, EARTH_RADIUS_KM};
pub use ids::{HospitalId, SignalId, VehicleId};
pub use structs::{Hospital, Signal, Telemetry, Vehicle};
