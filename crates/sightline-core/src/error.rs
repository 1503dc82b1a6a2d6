//! Error types for the orientation engine and its controller

use std::path::PathBuf;

/// Why a sample produced no result.
///
/// None of these are fatal; the controller logs them and skips the broadcast.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Projection system is singular (determinant {determinant:e})")]
    DegenerateProjection { determinant: f64 },

    #[error("Target coincides with the device (distance {distance:e})")]
    CoincidentTarget { distance: f64 },

    #[error("Non-finite value in {field}")]
    NonFinite { field: &'static str },
}

/// Errors surfaced by the sensors controller
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(
        "No usable sensor pathway: need a rotation-vector sensor or accelerometer plus magnetometer"
    )]
    NoSensors,

    #[error("Sensor hub error: {0}")]
    Hub(String),

    #[error("Controller task has shut down")]
    Disconnected,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
