//! Orientation engine
//!
//! Turns one rotation matrix plus the current device/target locations into an
//! [`OrientationResult`]:
//!
//! 1. yaw/pitch/roll straight from the matrix
//! 2. device plane from matrix columns 0 and 1, normal = X × Y
//! 3. `T = target - device`, projected onto the plane as `P`
//! 4. self-check `(O - P) · (T - P)`
//! 5. inclination `asin(|P - T| / |T|)`
//! 6. azimuth of `P` from the device X axis
//!
//! Degenerate geometry never produces NaN in a result: the sample is rejected
//! with an [`EngineError`] instead.

mod azimuth;
mod projection;
mod result;

pub use azimuth::{
    direction_cosines, is_saturated, plane_azimuth, resolve_quadrant, summed_sine,
    SATURATION_TOLERANCE,
};
pub use projection::{self_check, DevicePlane, Projection};
pub use result::{OrientationResult, SourceTag};

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::location::LocationSnapshot;
use crate::spatial::RotationMatrix;

/// Stateless calculator; all state lives in the caller's location store
#[derive(Debug, Clone, Default)]
pub struct OrientationEngine {
    config: EngineConfig,
}

impl OrientationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute attitude and plane-relative target bearing for one sample
    pub fn calculate(
        &self,
        source: SourceTag,
        rotation: &RotationMatrix,
        locations: &LocationSnapshot,
    ) -> Result<OrientationResult, EngineError> {
        if !rotation.is_finite() {
            return Err(EngineError::NonFinite {
                field: "rotation matrix",
            });
        }
        if !locations.device.is_finite() {
            return Err(EngineError::NonFinite {
                field: "device location",
            });
        }
        if !locations.target.is_finite() {
            return Err(EngineError::NonFinite {
                field: "target location",
            });
        }

        let euler = rotation.euler_angles();
        let plane = DevicePlane::from_rotation(rotation);

        let t = locations.target_vector();
        let distance = t.magnitude();
        if distance < self.config.coincident_epsilon {
            return Err(EngineError::CoincidentTarget { distance });
        }

        let projection = plane.project(&t, self.config.singular_epsilon)?;
        let p = projection.point.to_vector();

        let self_check = self_check(&projection.point, &t);
        let inclination = ((p - t).magnitude() / distance).clamp(-1.0, 1.0).asin();

        // Target on the plane normal: P collapses to the origin and the
        // bearing has no meaning. Report zero rather than NaN.
        let azimuth = if p.magnitude() < self.config.coincident_epsilon {
            0.0
        } else {
            let sine = summed_sine(&plane.x_axis, &p);
            if is_saturated(sine) {
                debug!(
                    source = %source,
                    sine,
                    "Summed sine saturated, azimuth pinned to ±90°"
                );
            }
            plane_azimuth(&plane.x_axis, &p)
        };

        let result = OrientationResult {
            source,
            yaw: euler.yaw,
            pitch: euler.pitch,
            roll: euler.roll,
            azimuth,
            inclination,
            self_check,
            projection: projection.point,
            target_vector: t,
        };

        if let Some(field) = result.first_non_finite() {
            return Err(EngineError::NonFinite { field });
        }

        debug!(
            source = %source,
            azimuth = result.azimuth,
            inclination = result.inclination,
            self_check = result.self_check,
            determinant = projection.determinant,
            "orientation calculated"
        );

        Ok(result)
    }
}
