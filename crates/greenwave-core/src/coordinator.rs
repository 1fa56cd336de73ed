//! The proximity coordinator -- the central decision engine.
//!
//! The [`Coordinator`] owns the signal registry, the vehicle tracker, and
//! the static hospital catalog; every mutation in the system is routed
//! through its methods, so there is no ambient global state. On each
//! position report it evaluates every signal against the reporting
//! vehicle and applies the color-transition policy:
//!
//! - closer than the trigger distance (default 0.5 km) and not GREEN:
//!   clear to GREEN
//! - GREEN and farther than the release distance (default 1.0 km):
//!   release to RED
//! - otherwise: no change
//!
//! The gap between the two thresholds is a deliberate hysteresis band. A
//! single-threshold rule would oscillate a signal's color whenever a
//! vehicle's reported position jitters near the boundary; the band damps
//! that. Ties at exactly the trigger or release distance favour no
//! transition (strict inequalities).
//!
//! Every signal is visited exactly once per report, so at most one color
//! transition is applied per signal per report. Evaluation is a purely
//! synchronous compute step between receiving a report and publishing
//! the resulting broadcasts.

use tracing::{debug, info};

use greenwave_types::{
    Coordinate, Hospital, Signal, SignalColor, SignalId, Telemetry, Vehicle, VehicleId,
};

use crate::config::{GreenwaveConfig, ProximityConfig};
use crate::error::CoreError;
use crate::events::{EventPublisher, StateEvent};
use crate::registry::SignalRegistry;
use crate::tracker::{VehicleTracker, VehicleUpdate};

/// An incoming vehicle position report.
///
/// The coordinate is optional only for vehicles already being tracked;
/// a first sighting without one is rejected.
#[derive(Debug, Clone)]
pub struct PositionReport {
    /// The reporting vehicle.
    pub vehicle_id: VehicleId,
    /// Reported position, if present.
    pub coordinate: Option<Coordinate>,
    /// Destination reference, if the report carries one.
    pub destination: Option<String>,
    /// Reported telemetry fields.
    pub telemetry: Telemetry,
}

/// The acknowledgment for a position report.
#[derive(Debug, Clone)]
pub struct PositionOutcome {
    /// The vehicle record after the upsert.
    pub vehicle: Vehicle,
    /// One signal that transitioned to GREEN during this report, if any.
    ///
    /// The legacy contract reports a single ID even when several signals
    /// triggered in the same pass (the first in registration order).
    /// Callers needing all of them must inspect the registry state.
    pub triggered: Option<SignalId>,
}

/// A navigation destination as requested by the driver.
#[derive(Debug, Clone)]
pub enum DestinationRef {
    /// A hospital or signal ID resolved against the static catalogs.
    Catalog(String),
    /// An ad-hoc destination given directly as a named coordinate.
    Adhoc {
        /// Display name for the destination.
        name: String,
        /// Destination position.
        coordinate: Coordinate,
    },
}

/// A resolved navigation destination.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResolvedDestination {
    /// The reference stored on the vehicle record (catalog ID or ad-hoc
    /// name).
    pub reference: String,
    /// Display name.
    pub name: String,
    /// Destination position.
    pub coordinate: Coordinate,
}

/// The result of a navigation start.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    /// The vehicle record after the route was installed.
    pub vehicle: Vehicle,
    /// The placeholder route (origin, midpoint, destination).
    pub route: Vec<Coordinate>,
    /// The resolved destination.
    pub destination: ResolvedDestination,
}

/// The single owner of all mutable corridor state.
///
/// All mutating operations (position reports, overrides, clear-all) are
/// serialized through `&mut self`, so an evaluation pass reads and writes
/// the whole signal set atomically -- concurrent overrides can never
/// interleave mid-pass. The server wraps the coordinator in one exclusive
/// lock; fan-out to observers happens through the non-blocking
/// [`EventPublisher`] and never holds up mutation.
#[derive(Debug)]
pub struct Coordinator {
    registry: SignalRegistry,
    tracker: VehicleTracker,
    hospitals: Vec<Hospital>,
    proximity: ProximityConfig,
}

impl Coordinator {
    /// Build a coordinator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateSignal`] if the configured signal
    /// list contains a repeated ID.
    pub fn new(config: &GreenwaveConfig) -> Result<Self, CoreError> {
        let signals = config
            .signals
            .iter()
            .cloned()
            .map(crate::config::SignalEntry::into_signal)
            .collect();
        let hospitals = config
            .hospitals
            .iter()
            .cloned()
            .map(crate::config::HospitalEntry::into_hospital)
            .collect();

        Ok(Self {
            registry: SignalRegistry::new(signals)?,
            tracker: VehicleTracker::new(),
            hospitals,
            proximity: config.proximity,
        })
    }

    // -----------------------------------------------------------------------
    // Position reports
    // -----------------------------------------------------------------------

    /// Ingest a position report, run the evaluation pass, and publish the
    /// resulting state.
    ///
    /// Unknown vehicle IDs are created on the spot as long as the report
    /// carries a coordinate. Evaluation always runs over the full current
    /// signal set, regardless of how many vehicles are active.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingCoordinate`] if this is the vehicle's
    /// first sighting and no coordinate was reported. State is unchanged
    /// in that case.
    pub fn report_position(
        &mut self,
        report: PositionReport,
        publisher: &dyn EventPublisher,
    ) -> Result<PositionOutcome, CoreError> {
        let vehicle = self.tracker.upsert(
            &report.vehicle_id,
            VehicleUpdate {
                coordinate: report.coordinate,
                destination: report.destination,
                telemetry: report.telemetry,
            },
        )?;

        debug!(
            vehicle = %vehicle.id,
            lat = vehicle.coordinate.lat,
            lng = vehicle.coordinate.lng,
            "position report"
        );

        let triggered = self.evaluate(vehicle.coordinate);

        publisher.publish(StateEvent::VehicleChanged(vehicle.clone()));
        publisher.publish(StateEvent::AllSignalsChanged(
            self.registry.signals().to_vec(),
        ));

        Ok(PositionOutcome { vehicle, triggered })
    }

    /// One evaluation pass over every signal for the given position.
    ///
    /// Returns the first signal that newly transitioned to GREEN, if any.
    fn evaluate(&mut self, position: Coordinate) -> Option<SignalId> {
        let mut triggered = None;

        for signal in self.registry.signals_mut() {
            let distance_km = position.distance_km(signal.coordinate);

            if distance_km < self.proximity.trigger_km {
                if signal.color != SignalColor::Green {
                    signal.color = SignalColor::Green;
                    info!(
                        signal = %signal.id,
                        name = signal.name,
                        distance_km,
                        "clearing junction to GREEN"
                    );
                    if triggered.is_none() {
                        triggered = Some(signal.id.clone());
                    }
                }
            } else if signal.color == SignalColor::Green
                && distance_km > self.proximity.release_km
            {
                signal.color = SignalColor::Red;
                info!(
                    signal = %signal.id,
                    name = signal.name,
                    distance_km,
                    "releasing junction to RED"
                );
            }
        }

        triggered
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Start (or restart) navigation for a vehicle.
    ///
    /// The destination resolves against the hospital catalog first, then
    /// the signal registry, or is taken verbatim when given ad-hoc. The
    /// installed route is a deliberately crude three-point straight line
    /// (origin, midpoint, destination) standing in for a real
    /// path-planning routine; it must not be mistaken for routing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DestinationNotFound`] if a catalog reference
    /// matches neither a hospital nor a signal.
    pub fn start_navigation(
        &mut self,
        vehicle_id: &VehicleId,
        destination: DestinationRef,
        origin: Coordinate,
        publisher: &dyn EventPublisher,
    ) -> Result<NavigationOutcome, CoreError> {
        let destination = self.resolve_destination(destination)?;

        let route = vec![
            origin,
            origin.midpoint(destination.coordinate),
            destination.coordinate,
        ];

        let vehicle = self.tracker.begin_route(
            vehicle_id,
            origin,
            destination.reference.clone(),
            route.clone(),
        );

        info!(
            vehicle = %vehicle.id,
            destination = destination.name,
            "navigation started"
        );

        publisher.publish(StateEvent::VehicleChanged(vehicle.clone()));

        Ok(NavigationOutcome {
            vehicle,
            route,
            destination,
        })
    }

    /// Resolve a destination reference to a concrete named coordinate.
    fn resolve_destination(
        &self,
        destination: DestinationRef,
    ) -> Result<ResolvedDestination, CoreError> {
        match destination {
            DestinationRef::Adhoc { name, coordinate } => Ok(ResolvedDestination {
                reference: name.clone(),
                name,
                coordinate,
            }),
            DestinationRef::Catalog(reference) => {
                if let Some(hospital) = self.hospitals.iter().find(|h| h.id.as_str() == reference)
                {
                    return Ok(ResolvedDestination {
                        reference,
                        name: hospital.name.clone(),
                        coordinate: hospital.coordinate,
                    });
                }
                if let Ok(signal) = self.registry.get(&SignalId::new(reference.clone())) {
                    return Ok(ResolvedDestination {
                        reference,
                        name: signal.name.clone(),
                        coordinate: signal.coordinate,
                    });
                }
                Err(CoreError::DestinationNotFound(reference))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Overrides and administration
    // -----------------------------------------------------------------------

    /// Set a signal's color unconditionally, bypassing the policy.
    ///
    /// The override persists only until the next qualifying evaluation
    /// pass for that signal -- automatic evaluation is not suppressed
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SignalNotFound`] for an unknown signal ID.
    pub fn override_signal(
        &mut self,
        id: &SignalId,
        color: SignalColor,
        publisher: &dyn EventPublisher,
    ) -> Result<Signal, CoreError> {
        let signal = self.registry.set_color(id, color)?.clone();

        info!(signal = %signal.id, color = %color, "manual override");

        publisher.publish(StateEvent::AllSignalsChanged(
            self.registry.signals().to_vec(),
        ));

        Ok(signal)
    }

    /// Remove every tracked vehicle and publish the now-empty set.
    pub fn clear_vehicles(&mut self, publisher: &dyn EventPublisher) {
        self.tracker.clear();
        info!("vehicle set cleared");
        publisher.publish(StateEvent::AllVehiclesChanged(Vec::new()));
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// All signals in registration order.
    pub fn signals(&self) -> &[Signal] {
        self.registry.signals()
    }

    /// All tracked vehicles in insertion order.
    pub fn vehicles(&self) -> &[Vehicle] {
        self.tracker.vehicles()
    }

    /// The static hospital catalog.
    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    /// Look up a vehicle by ID.
    pub fn find_vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.tracker.find(id)
    }
}
