//! The fixed signal registry.
//!
//! Holds the set of traffic-signal junctions created once at process
//! start from configuration. Signal IDs are unique and immutable after
//! construction; only the color mutates, either through the proximity
//! policy or an explicit manual override. Signals are never removed
//! during the process lifetime.

use greenwave_types::{Signal, SignalColor, SignalId};

use crate::error::CoreError;

/// The fixed set of signal junctions, in registration order.
///
/// Listing order is stable and equals the order of the configuration
/// list. Mutating a color does not itself broadcast anything; pushing
/// the updated state to observers is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct SignalRegistry {
    signals: Vec<Signal>,
}

impl SignalRegistry {
    /// Build a registry from the configured signal list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateSignal`] if two entries share an ID.
    pub fn new(signals: Vec<Signal>) -> Result<Self, CoreError> {
        for (i, signal) in signals.iter().enumerate() {
            if signals
                .iter()
                .take(i)
                .any(|earlier| earlier.id == signal.id)
            {
                return Err(CoreError::DuplicateSignal(signal.id.clone()));
            }
        }
        Ok(Self { signals })
    }

    /// All signals in registration order.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Look up a signal by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SignalNotFound`] for an unknown ID.
    pub fn get(&self, id: &SignalId) -> Result<&Signal, CoreError> {
        self.signals
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::SignalNotFound(id.clone()))
    }

    /// Set a signal's color in place and return the updated signal.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SignalNotFound`] for an unknown ID.
    pub fn set_color(&mut self, id: &SignalId, color: SignalColor) -> Result<&Signal, CoreError> {
        let signal = self
            .signals
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::SignalNotFound(id.clone()))?;
        signal.color = color;
        Ok(signal)
    }

    /// Mutable iteration over all signals, for the evaluation pass.
    pub(crate) fn signals_mut(&mut self) -> impl Iterator<Item = &mut Signal> {
        self.signals.iter_mut()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use greenwave_types::Coordinate;

    use super::*;

    fn sample_signals() -> Vec<Signal> {
        vec![
            Signal {
                id: SignalId::new("SIG-BENZ"),
                name: String::from("Benz Circle"),
                coordinate: Coordinate::new(16.5062, 80.6480),
                color: SignalColor::Red,
            },
            Signal {
                id: SignalId::new("SIG-NTR"),
                name: String::from("NTR Circle"),
                coordinate: Coordinate::new(16.5150, 80.6300),
                color: SignalColor::Red,
            },
        ]
    }

    #[test]
    fn listing_preserves_registration_order() {
        let registry = SignalRegistry::new(sample_signals()).unwrap();
        let ids: Vec<&str> = registry.signals().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["SIG-BENZ", "SIG-NTR"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut signals = sample_signals();
        signals.push(signals[0].clone());
        let result = SignalRegistry::new(signals);
        assert!(matches!(result, Err(CoreError::DuplicateSignal(id)) if id.as_str() == "SIG-BENZ"));
    }

    #[test]
    fn set_color_updates_in_place() {
        let mut registry = SignalRegistry::new(sample_signals()).unwrap();
        let id = SignalId::new("SIG-NTR");
        let updated = registry.set_color(&id, SignalColor::Green).unwrap();
        assert_eq!(updated.color, SignalColor::Green);
        assert_eq!(registry.get(&id).unwrap().color, SignalColor::Green);
        // The other signal is untouched.
        assert_eq!(
            registry.get(&SignalId::new("SIG-BENZ")).unwrap().color,
            SignalColor::Red
        );
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut registry = SignalRegistry::new(sample_signals()).unwrap();
        let id = SignalId::new("SIG-NOPE");
        assert!(matches!(registry.get(&id), Err(CoreError::SignalNotFound(_))));
        assert!(matches!(
            registry.set_color(&id, SignalColor::Green),
            Err(CoreError::SignalNotFound(_))
        ));
    }
}
