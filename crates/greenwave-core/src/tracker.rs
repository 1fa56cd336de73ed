//! The live vehicle tracker.
//!
//! Holds the set of currently active emergency vehicles keyed by vehicle
//! ID. A vehicle is created on its first position report (or navigation
//! start) and updated in place afterwards with last-write-wins merge
//! semantics per field. The only removal path is the administrative
//! clear-all command; there is no per-vehicle removal and no automatic
//! expiry.

use chrono::Utc;
use greenwave_types::{Coordinate, Telemetry, Vehicle, VehicleId};

use crate::error::CoreError;

/// A partial vehicle update carried by a position report.
///
/// Fields that are `None` leave the stored value untouched. The
/// coordinate is mandatory only on a vehicle's first sighting.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    /// New position, if reported.
    pub coordinate: Option<Coordinate>,
    /// New destination reference, if reported.
    pub destination: Option<String>,
    /// Telemetry fields; each inner `None` is "not reported".
    pub telemetry: Telemetry,
}

/// The set of currently tracked emergency vehicles.
///
/// Listing order is insertion order. The order carries no semantic
/// meaning; it is merely stable so dashboards do not reshuffle.
#[derive(Debug, Clone, Default)]
pub struct VehicleTracker {
    vehicles: Vec<Vehicle>,
}

impl VehicleTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self { vehicles: Vec::new() }
    }

    /// Insert or merge a vehicle record.
    ///
    /// A new ID creates a vehicle with all unspecified fields defaulted.
    /// An existing ID merges: present fields overwrite, absent fields are
    /// left untouched. Either way `updated_at` is refreshed. A set
    /// coordinate is never reverted to unset by a later report.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingCoordinate`] if `id` is new and the
    /// update carries no coordinate.
    pub fn upsert(&mut self, id: &VehicleId, update: VehicleUpdate) -> Result<Vehicle, CoreError> {
        if let Some(vehicle) = self.vehicles.iter_mut().find(|v| &v.id == id) {
            if let Some(coordinate) = update.coordinate {
                vehicle.coordinate = coordinate;
            }
            if let Some(destination) = update.destination {
                vehicle.destination = Some(destination);
            }
            merge_telemetry(&mut vehicle.telemetry, update.telemetry);
            vehicle.updated_at = Utc::now();
            Ok(vehicle.clone())
        } else {
            let coordinate = update
                .coordinate
                .ok_or_else(|| CoreError::MissingCoordinate(id.clone()))?;
            let mut vehicle = Vehicle::sighted(id.clone(), coordinate);
            vehicle.destination = update.destination;
            merge_telemetry(&mut vehicle.telemetry, update.telemetry);
            self.vehicles.push(vehicle.clone());
            Ok(vehicle)
        }
    }

    /// Construct or replace a vehicle record at navigation start.
    ///
    /// The record is replaced wholesale: origin becomes the current
    /// coordinate, the destination reference and route are installed, and
    /// previously reported telemetry is discarded for the new trip.
    pub fn begin_route(
        &mut self,
        id: &VehicleId,
        origin: Coordinate,
        destination: String,
        route: Vec<Coordinate>,
    ) -> Vehicle {
        let mut vehicle = Vehicle::sighted(id.clone(), origin);
        vehicle.destination = Some(destination);
        vehicle.route = route;

        if let Some(existing) = self.vehicles.iter_mut().find(|v| &v.id == id) {
            *existing = vehicle.clone();
        } else {
            self.vehicles.push(vehicle.clone());
        }
        vehicle
    }

    /// All tracked vehicles in insertion order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Look up a vehicle by ID.
    pub fn find(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id)
    }

    /// Remove every tracked vehicle.
    pub fn clear(&mut self) {
        self.vehicles.clear();
    }

    /// Number of tracked vehicles.
    pub const fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether no vehicles are tracked.
    pub const fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

/// Merge reported telemetry into stored telemetry, field by field.
fn merge_telemetry(stored: &mut Telemetry, reported: Telemetry) {
    if reported.eta_minutes.is_some() {
        stored.eta_minutes = reported.eta_minutes;
    }
    if reported.speed_kmh.is_some() {
        stored.speed_kmh = reported.speed_kmh;
    }
    if reported.distance_km.is_some() {
        stored.distance_km = reported.distance_km;
    }
}
