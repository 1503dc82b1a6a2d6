//! Quaternion representation for 3D rotations
//!
//! Rotation-vector sensors report the vector part of a unit quaternion, so the
//! converter and the sample simulator both go through this type.

use super::{RotationMatrix, Vector3};
use std::ops::Mul;

/// A quaternion for representing 3D rotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a new quaternion
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vector3, angle_radians: f64) -> Self {
        let half_angle = angle_radians / 2.0;
        let sin_half = half_angle.sin();
        let normalized = axis.normalize();

        Self {
            x: normalized.x * sin_half,
            y: normalized.y * sin_half,
            z: normalized.z * sin_half,
            w: half_angle.cos(),
        }
    }

    /// Rebuild a unit quaternion from its vector part, as a rotation-vector
    /// sensor reports it. The scalar part is taken as non-negative; if the
    /// vector part is longer than one the scalar part is clamped to zero.
    pub fn from_vector_part(v: [f64; 3]) -> Self {
        let w_sq = 1.0 - v[0] * v[0] - v[1] * v[1] - v[2] * v[2];
        let w = if w_sq > 0.0 { w_sq.sqrt() } else { 0.0 };
        Self::new(v[0], v[1], v[2], w)
    }

    /// Same rotation with a non-negative scalar part
    pub fn canonical(&self) -> Self {
        if self.w < 0.0 {
            Self::new(-self.x, -self.y, -self.z, -self.w)
        } else {
            *self
        }
    }

    /// Vector part `[x, y, z]` of the canonical form
    pub fn vector_part(&self) -> [f64; 3] {
        let q = self.canonical();
        [q.x, q.y, q.z]
    }

    /// Row-major rotation matrix of this (unit) quaternion
    pub fn to_rotation_matrix(&self) -> RotationMatrix {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let (xx, yy, zz) = (2.0 * x * x, 2.0 * y * y, 2.0 * z * z);
        let (xy, xz, yz) = (2.0 * x * y, 2.0 * x * z, 2.0 * y * z);
        let (xw, yw, zw) = (2.0 * x * w, 2.0 * y * w, 2.0 * z * w);

        RotationMatrix::from_row_major([
            1.0 - yy - zz,
            xy - zw,
            xz + yw,
            xy + zw,
            1.0 - xx - zz,
            yz - xw,
            xz - yw,
            yz + xw,
            1.0 - xx - yy,
        ])
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity() {
        assert_eq!(
            Quaternion::IDENTITY.to_rotation_matrix(),
            RotationMatrix::identity()
        );
    }

    #[test]
    fn test_90_degree_rotation_about_z() {
        let m = Quaternion::from_axis_angle(Vector3::Z, PI / 2.0).to_rotation_matrix();
        assert!((m.mul_vector(&Vector3::X) - Vector3::Y).magnitude() < 1e-12);
    }

    #[test]
    fn test_product_composes_rotations() {
        let quarter = Quaternion::from_axis_angle(Vector3::Z, PI / 2.0);
        let m = (quarter * quarter).to_rotation_matrix();
        assert!((m.mul_vector(&Vector3::X) + Vector3::X).magnitude() < 1e-12);

        // Right factor applies first
        let q = Quaternion::from_axis_angle(Vector3::Z, PI / 2.0)
            * Quaternion::from_axis_angle(Vector3::X, PI / 2.0);
        let m = q.to_rotation_matrix();
        assert!((m.mul_vector(&Vector3::Y) - Vector3::Z).magnitude() < 1e-12);
    }

    #[test]
    fn test_vector_part_roundtrip() {
        let q = Quaternion::from_axis_angle(Vector3::Y, -2.5)
            * Quaternion::from_axis_angle(Vector3::X, 0.4);
        let rebuilt = Quaternion::from_vector_part(q.vector_part());
        let a = q.canonical();
        assert!((rebuilt.w - a.w).abs() < 1e-12);
        assert!((rebuilt.x - a.x).abs() < 1e-12);
    }

    #[test]
    fn test_overlong_vector_part_clamps_scalar() {
        let q = Quaternion::from_vector_part([1.0, 1.0, 0.0]);
        assert_eq!(q.w, 0.0);
    }
}
