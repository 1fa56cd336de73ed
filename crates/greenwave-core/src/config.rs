//! Configuration loading and typed config structures for Greenwave.
//!
//! The canonical configuration lives in `greenwave.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and provides a loader that reads and validates the file.
//! Every section has built-in defaults (the Vijayawada pilot deployment),
//! so the engine also runs with no file at all.

use std::path::Path;

use serde::Deserialize;

use greenwave_types::{Coordinate, Hospital, HospitalId, Signal, SignalColor, SignalId};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The release distance does not exceed the trigger distance, which
    /// would collapse the hysteresis band and reintroduce flapping.
    #[error("release_km ({release_km}) must exceed trigger_km ({trigger_km})")]
    InvalidThresholds {
        /// Configured trigger distance in km.
        trigger_km: f64,
        /// Configured release distance in km.
        release_km: f64,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Greenwave configuration.
///
/// Mirrors the structure of `greenwave.yaml`. All fields have defaults
/// matching the pilot deployment data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GreenwaveConfig {
    /// The fixed signal junction set.
    #[serde(default = "default_signals")]
    pub signals: Vec<SignalEntry>,

    /// The static hospital destination catalog.
    #[serde(default = "default_hospitals")]
    pub hospitals: Vec<HospitalEntry>,

    /// Proximity policy thresholds.
    #[serde(default)]
    pub proximity: ProximityConfig,

    /// Observer server bind settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GreenwaveConfig {
    fn default() -> Self {
        Self {
            signals: default_signals(),
            hospitals: default_hospitals(),
            proximity: ProximityConfig::default(),
            observer: ObserverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GreenwaveConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidThresholds`] if the hysteresis band is
    /// inverted or empty.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidThresholds`] if the hysteresis band is
    /// inverted or empty.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.proximity.validate()?;
        Ok(config)
    }
}

/// One signal junction in the configuration list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalEntry {
    /// Unique junction identifier.
    pub id: String,
    /// Human-readable junction name.
    pub name: String,
    /// Junction latitude in decimal degrees.
    pub lat: f64,
    /// Junction longitude in decimal degrees.
    pub lng: f64,
}

impl SignalEntry {
    /// Convert the entry into a runtime [`Signal`], starting RED.
    pub fn into_signal(self) -> Signal {
        Signal {
            id: SignalId::new(self.id),
            name: self.name,
            coordinate: Coordinate::new(self.lat, self.lng),
            color: SignalColor::Red,
        }
    }
}

/// One hospital in the configuration catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HospitalEntry {
    /// Unique hospital identifier.
    pub id: String,
    /// Hospital name.
    pub name: String,
    /// Hospital latitude in decimal degrees.
    pub lat: f64,
    /// Hospital longitude in decimal degrees.
    pub lng: f64,
    /// Street address shown on the dashboards.
    #[serde(default)]
    pub address: String,
}

impl HospitalEntry {
    /// Convert the entry into a runtime [`Hospital`].
    pub fn into_hospital(self) -> Hospital {
        Hospital {
            id: HospitalId::new(self.id),
            name: self.name,
            coordinate: Coordinate::new(self.lat, self.lng),
            address: self.address,
        }
    }
}

/// Trigger and release distances for the proximity policy.
///
/// The gap between `trigger_km` and `release_km` is the hysteresis band:
/// a signal turned GREEN inside the trigger distance stays GREEN until
/// the vehicle is beyond the release distance, so position jitter near
/// the trigger boundary cannot flap the color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProximityConfig {
    /// Distance below which a signal is cleared to GREEN.
    #[serde(default = "default_trigger_km")]
    pub trigger_km: f64,
    /// Distance beyond which a GREEN signal is released back to RED.
    #[serde(default = "default_release_km")]
    pub release_km: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            trigger_km: default_trigger_km(),
            release_km: default_release_km(),
        }
    }
}

impl ProximityConfig {
    /// Check that the hysteresis band is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThresholds`] if `release_km` does
    /// not exceed `trigger_km`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.release_km > self.trigger_km {
            Ok(())
        } else {
            Err(ConfigError::InvalidThresholds {
                trigger_km: self.trigger_km,
                release_km: self.release_km,
            })
        }
    }
}

/// Observer server bind settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObserverConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter directive (overridden by `RUST_LOG`).
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

const fn default_trigger_km() -> f64 {
    0.5
}

const fn default_release_km() -> f64 {
    1.0
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_filter() -> String {
    String::from("info")
}

/// The pilot deployment's key junctions (Vijayawada).
fn default_signals() -> Vec<SignalEntry> {
    vec![
        SignalEntry {
            id: String::from("SIG-BENZ"),
            name: String::from("Benz Circle"),
            lat: 16.5062,
            lng: 80.6480,
        },
        SignalEntry {
            id: String::from("SIG-NTR"),
            name: String::from("NTR Circle"),
            lat: 16.5150,
            lng: 80.6300,
        },
        SignalEntry {
            id: String::from("SIG-RAGHU"),
            name: String::from("Raghu Gardens Junction"),
            lat: 16.4980,
            lng: 80.6550,
        },
        SignalEntry {
            id: String::from("SIG-CONTROL"),
            name: String::from("Police Control Room"),
            lat: 16.5080,
            lng: 80.6150,
        },
    ]
}

/// The pilot deployment's hospital catalog (Vijayawada).
fn default_hospitals() -> Vec<HospitalEntry> {
    vec![
        HospitalEntry {
            id: String::from("HOSP-RAMESH"),
            name: String::from("Ramesh Hospitals"),
            lat: 16.5020,
            lng: 80.6400,
            address: String::from("MG Road, Vijayawada"),
        },
        HospitalEntry {
            id: String::from("HOSP-MANIPAL"),
            name: String::from("Manipal Hospital"),
            lat: 16.4780,
            lng: 80.6200,
            address: String::from("Tadepalli, Vijayawada"),
        },
        HospitalEntry {
            id: String::from("HOSP-GOVT"),
            name: String::from("Government General Hospital"),
            lat: 16.5100,
            lng: 80.6180,
            address: String::from("Hanumanpet, Vijayawada"),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_pilot_deployment() {
        let config = GreenwaveConfig::default();
        assert_eq!(config.signals.len(), 4);
        assert_eq!(config.hospitals.len(), 3);
        assert_eq!(config.proximity.trigger_km, 0.5);
        assert_eq!(config.proximity.release_km, 1.0);
        assert_eq!(config.observer.port, 5000);
    }

    #[test]
    fn empty_yaml_parses_to_defaults() {
        let config = GreenwaveConfig::parse("{}").unwrap();
        assert_eq!(config, GreenwaveConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_one_section() {
        let yaml = r"
proximity:
  trigger_km: 0.3
observer:
  port: 8080
";
        let config = GreenwaveConfig::parse(yaml).unwrap();
        assert_eq!(config.proximity.trigger_km, 0.3);
        // Unset fields in a present section still default.
        assert_eq!(config.proximity.release_km, 1.0);
        assert_eq!(config.observer.port, 8080);
        assert_eq!(config.observer.host, "0.0.0.0");
        // Untouched sections keep their defaults.
        assert_eq!(config.signals.len(), 4);
    }

    #[test]
    fn custom_signal_list_replaces_defaults() {
        let yaml = r"
signals:
  - id: SIG-1
    name: Test Junction
    lat: 16.4971
    lng: 80.6517
";
        let config = GreenwaveConfig::parse(yaml).unwrap();
        assert_eq!(config.signals.len(), 1);
        let signal = config.signals.into_iter().next().unwrap().into_signal();
        assert_eq!(signal.id.as_str(), "SIG-1");
        assert_eq!(signal.color, greenwave_types::SignalColor::Red);
    }

    #[test]
    fn collapsed_hysteresis_band_is_rejected() {
        let yaml = r"
proximity:
  trigger_km: 1.0
  release_km: 1.0
";
        let result = GreenwaveConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::InvalidThresholds { .. })));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let result = GreenwaveConfig::parse(": not yaml :");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
