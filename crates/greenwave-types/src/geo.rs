//! Geographic coordinates and great-circle distance.
//!
//! Proximity decisions in the coordinator are driven entirely by
//! [`Coordinate::distance_km`], a haversine great-circle distance. The
//! function is deterministic, symmetric, and returns zero for identical
//! points, which the trigger/release policy relies on.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Mean Earth radius in kilometres used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinate {
    /// Latitude in decimal degrees (positive north).
    pub lat: f64,
    /// Longitude in decimal degrees (positive east).
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from a latitude/longitude pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    ///
    /// Symmetric within floating-point tolerance and zero for identical
    /// coordinates. No side effects.
    pub fn distance_km(self, other: Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Midpoint of the straight line between two coordinates.
    ///
    /// Arithmetic mean of the components, not a geodesic midpoint. Good
    /// enough for the placeholder route used at navigation start.
    pub const fn midpoint(self, other: Self) -> Self {
        Self {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }
}
