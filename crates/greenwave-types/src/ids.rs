//! Type-safe identifier wrappers around [`String`].
//!
//! Every entity in the corridor system has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. Identifiers are
//! operator-assigned strings (`SIG-BENZ`, `AMB-1`, `HOSP-RAMESH`) rather
//! than generated values: signals and hospitals come from the static
//! configuration, vehicle IDs arrive with the first position report.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything convertible to a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a traffic signal junction.
    SignalId
}

define_id! {
    /// Unique identifier for a tracked emergency vehicle.
    VehicleId
}

define_id! {
    /// Unique identifier for a hospital in the static catalog.
    HospitalId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let signal = SignalId::new("SIG-BENZ");
        let vehicle = VehicleId::new("AMB-1");
        // These are different types -- the compiler enforces no mixing.
        assert_eq!(signal.as_str(), "SIG-BENZ");
        assert_eq!(vehicle.as_str(), "AMB-1");
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = SignalId::new("SIG-NTR");
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("\"SIG-NTR\""));
        let restored: Result<SignalId, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_inner() {
        let id = VehicleId::new("AMB-7");
        assert_eq!(id.to_string(), "AMB-7");
        assert_eq!(id.clone().into_inner(), "AMB-7");
    }
}
