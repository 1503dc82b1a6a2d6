//! Sensor sample types

use serde::{Deserialize, Serialize};

/// Sensor streams the controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Device-local acceleration including gravity
    Accelerometer,
    /// Device-local geomagnetic field
    MagneticField,
    /// Vector part of the fused attitude quaternion
    RotationVector,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::RotationVector,
        SensorKind::Accelerometer,
        SensorKind::MagneticField,
    ];
}

/// One reading of three values from a sensor stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub kind: SensorKind,
    pub values: [f64; 3],
}

impl SensorSample {
    pub fn new(kind: SensorKind, values: [f64; 3]) -> Self {
        Self { kind, values }
    }

    pub fn accelerometer(values: [f64; 3]) -> Self {
        Self::new(SensorKind::Accelerometer, values)
    }

    pub fn magnetic_field(values: [f64; 3]) -> Self {
        Self::new(SensorKind::MagneticField, values)
    }

    pub fn rotation_vector(values: [f64; 3]) -> Self {
        Self::new(SensorKind::RotationVector, values)
    }
}

/// Which sensors a hub can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorSet {
    pub rotation_vector: bool,
    pub accelerometer: bool,
    pub magnetometer: bool,
}

impl SensorSet {
    pub fn all() -> Self {
        Self {
            rotation_vector: true,
            accelerometer: true,
            magnetometer: true,
        }
    }

    pub fn contains(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::RotationVector => self.rotation_vector,
            SensorKind::Accelerometer => self.accelerometer,
            SensorKind::MagneticField => self.magnetometer,
        }
    }

    /// Rotation-vector pathway usable
    pub fn has_rotation_vector(&self) -> bool {
        self.rotation_vector
    }

    /// Raw pathway usable (needs both halves)
    pub fn has_raw_pair(&self) -> bool {
        self.accelerometer && self.magnetometer
    }

    pub fn is_usable(&self) -> bool {
        self.has_rotation_vector() || self.has_raw_pair()
    }

    pub fn kinds(&self) -> impl Iterator<Item = SensorKind> + '_ {
        SensorKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }
}
