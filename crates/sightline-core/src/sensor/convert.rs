//! Sensor readings to rotation matrices
//!
//! This is the collaborator seam between platform sensors and the engine. A
//! platform with its own conversion routines implements [`RotationConverter`];
//! [`StandardConverter`] uses the conventional formulas with an
//! east/north/up world frame.

use crate::spatial::{Quaternion, RotationMatrix, Vector3};

/// Standard gravity, m/s²
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Below this fraction of standard gravity the device is treated as falling
const FREE_FALL_FRACTION: f64 = 0.01;

/// Minimum `|m × g|` for a usable east vector
const MIN_EAST_MAGNITUDE: f64 = 0.1;

pub trait RotationConverter: Send {
    /// Rotation matrix from a rotation-vector reading
    fn from_rotation_vector(&self, values: [f64; 3]) -> RotationMatrix;

    /// Rotation matrix from gravity and geomagnetic readings, or `None` when
    /// the pair does not define an attitude
    fn from_gravity_and_geomagnetic(
        &self,
        gravity: [f64; 3],
        geomagnetic: [f64; 3],
    ) -> Option<RotationMatrix>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConverter;

impl RotationConverter for StandardConverter {
    fn from_rotation_vector(&self, values: [f64; 3]) -> RotationMatrix {
        Quaternion::from_vector_part(values).to_rotation_matrix()
    }

    /// Rows of the result are east, north and up in device coordinates.
    ///
    /// Fails in free fall (`|g|` under 1% of standard gravity) or when the
    /// field is close to parallel with gravity (near the magnetic poles).
    fn from_gravity_and_geomagnetic(
        &self,
        gravity: [f64; 3],
        geomagnetic: [f64; 3],
    ) -> Option<RotationMatrix> {
        let g = Vector3::from(gravity);
        let m = Vector3::from(geomagnetic);

        let free_fall = FREE_FALL_FRACTION * STANDARD_GRAVITY;
        if g.magnitude_squared() < free_fall * free_fall {
            return None;
        }

        let east = m.cross(&g);
        let east_len = east.magnitude();
        if east_len < MIN_EAST_MAGNITUDE {
            return None;
        }

        let east = east * (1.0 / east_len);
        let up = g.normalize();
        let north = up.cross(&east);

        Some(RotationMatrix::from_row_vectors(east, north, up))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_zero_rotation_vector_is_identity() {
        let m = StandardConverter.from_rotation_vector([0.0, 0.0, 0.0]);
        assert_eq!(m, RotationMatrix::identity());
    }

    #[test]
    fn test_rotation_vector_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
        let m = StandardConverter.from_rotation_vector(q.vector_part());
        // Device X now points along world Y
        assert!((m.column(0) - Vector3::Y).magnitude() < 1e-12);
        assert!(m.is_rotation(1e-12));
    }

    #[test]
    fn test_flat_device_facing_north_is_identity() {
        let m = StandardConverter
            .from_gravity_and_geomagnetic([0.0, 0.0, STANDARD_GRAVITY], [0.0, 22.0, -40.0])
            .unwrap();
        assert!(m.is_rotation(1e-12));
        for (a, b) in m.as_row_major().iter().zip(RotationMatrix::identity().as_row_major()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_free_fall_is_rejected() {
        assert!(StandardConverter
            .from_gravity_and_geomagnetic([0.0, 0.0, 0.05], [0.0, 22.0, -40.0])
            .is_none());
    }

    #[test]
    fn test_field_parallel_to_gravity_is_rejected() {
        assert!(StandardConverter
            .from_gravity_and_geomagnetic([0.0, 0.0, STANDARD_GRAVITY], [0.0, 0.0, -45.0])
            .is_none());
    }
}
