//! Core entity structs for the Greenwave corridor system.
//!
//! Covers the signal junction, the static hospital catalog entry, and the
//! tracked emergency vehicle with its optional trip telemetry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::SignalColor;
use crate::geo::Coordinate;
use crate::ids::{HospitalId, SignalId, VehicleId};

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// A traffic-light junction with a binary color state.
///
/// Signals are created once at process start from the configuration list
/// and live for the whole process. Only the proximity coordinator and
/// explicit manual overrides mutate the color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Signal {
    /// Unique, immutable junction identifier.
    pub id: SignalId,
    /// Human-readable junction name.
    pub name: String,
    /// Fixed junction position.
    pub coordinate: Coordinate,
    /// Current color state.
    pub color: SignalColor,
}

// ---------------------------------------------------------------------------
// Hospital
// ---------------------------------------------------------------------------

/// A hospital in the static destination catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Hospital {
    /// Unique hospital identifier.
    pub id: HospitalId,
    /// Hospital name.
    pub name: String,
    /// Hospital position.
    pub coordinate: Coordinate,
    /// Street address for the dashboards.
    pub address: String,
}

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

/// Optional trip telemetry reported alongside a vehicle position.
///
/// Every field is optional; a report that omits a field leaves the
/// previously stored value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Telemetry {
    /// Estimated minutes to the destination.
    pub eta_minutes: Option<f64>,
    /// Current speed in km/h.
    pub speed_kmh: Option<f64>,
    /// Remaining distance to the destination in kilometres.
    pub distance_km: Option<f64>,
}

/// A tracked emergency vehicle with its latest reported position.
///
/// Created on the first position report (or navigation start) bearing a
/// new ID and updated in place afterwards. A vehicle always has a
/// coordinate: the first sighting must carry one and later reports can
/// only move it, never unset it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vehicle {
    /// Unique vehicle identifier (e.g. `AMB-1`).
    pub id: VehicleId,
    /// Latest reported position.
    pub coordinate: Coordinate,
    /// Destination reference: a hospital ID, a signal ID, or an ad-hoc
    /// destination name. `None` until navigation starts.
    pub destination: Option<String>,
    /// Latest reported trip telemetry.
    pub telemetry: Telemetry,
    /// Planned path as an ordered coordinate sequence. Empty until
    /// navigation starts.
    pub route: Vec<Coordinate>,
    /// Wall-clock time of the most recent report for this vehicle.
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create a freshly sighted vehicle with no destination, no route,
    /// and empty telemetry.
    pub fn sighted(id: VehicleId, coordinate: Coordinate) -> Self {
        Self {
            id,
            coordinate,
            destination: None,
            telemetry: Telemetry::default(),
            route: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn sighted_vehicle_has_defaults() {
        let v = Vehicle::sighted(VehicleId::new("AMB-1"), Coordinate::new(16.5, 80.6));
        assert!(v.destination.is_none());
        assert!(v.route.is_empty());
        assert_eq!(v.telemetry, Telemetry::default());
    }

    #[test]
    fn signal_serde_wire_shape() {
        let signal = Signal {
            id: SignalId::new("SIG-BENZ"),
            name: String::from("Benz Circle"),
            coordinate: Coordinate::new(16.5062, 80.6480),
            color: SignalColor::Red,
        };
        let json = serde_json::to_value(&signal).ok();
        let json = json.as_ref();
        assert_eq!(json.and_then(|j| j["id"].as_str()), Some("SIG-BENZ"));
        assert_eq!(json.and_then(|j| j["color"].as_str()), Some("RED"));
    }

    #[test]
    fn telemetry_fields_all_optional() {
        let t: Result<Telemetry, _> = serde_json::from_str("{}");
        assert_eq!(t.ok(), Some(Telemetry::default()));
    }
}
