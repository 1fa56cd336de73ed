//! Enumeration types for the Greenwave corridor system.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The binary color state of a traffic signal junction.
///
/// Only the two states relevant to emergency clearance are modeled:
/// a junction is either held GREEN for an approaching vehicle or RED.
/// Serialized as upper-case strings for wire compatibility with the
/// legacy dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalColor {
    /// Normal state: traffic is held.
    Red,
    /// Cleared state: the corridor is open for the emergency vehicle.
    Green,
}

impl SignalColor {
    /// Whether this is the cleared (GREEN) state.
    pub const fn is_green(self) -> bool {
        matches!(self, Self::Green)
    }
}

impl core::fmt::Display for SignalColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Red => write!(f, "RED"),
            Self::Green => write!(f, "GREEN"),
        }
    }
}
