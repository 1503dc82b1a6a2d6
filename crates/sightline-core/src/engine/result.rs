//! Per-sample engine output

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3, Vector3};

/// Which sensor pathway produced the rotation matrix.
///
/// Carried through to the result untouched; the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// Fused rotation-vector sensor
    RotationVector,
    /// Accelerometer plus magnetometer pair
    Raw,
}

impl SourceTag {
    pub fn label(&self) -> &'static str {
        match self {
            SourceTag::RotationVector => "rotation_vector",
            SourceTag::Raw => "raw",
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Device attitude plus the target's bearing relative to the device plane.
///
/// All angles are radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationResult {
    pub source: SourceTag,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    /// Bearing inside the device plane, measured from the device X axis
    pub azimuth: f64,
    /// Angle between the target direction and the device plane
    pub inclination: f64,
    /// `(O - P) · (T - P)`; zero for a consistent projection
    pub self_check: f64,
    /// Target vector projected onto the device plane
    pub projection: Point3,
    /// Target minus device
    pub target_vector: Vector3,
}

impl OrientationResult {
    /// Name of the first non-finite field, if any
    pub(crate) fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("yaw", self.yaw),
            ("pitch", self.pitch),
            ("roll", self.roll),
            ("azimuth", self.azimuth),
            ("inclination", self.inclination),
            ("self_check", self.self_check),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}
