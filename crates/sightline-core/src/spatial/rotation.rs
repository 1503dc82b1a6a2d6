//! Row-major 3x3 rotation matrix
//!
//! Index layout:
//! ```text
//!   /  m[0]  m[1]  m[2]  \
//!   |  m[3]  m[4]  m[5]  |
//!   \  m[6]  m[7]  m[8]  /
//! ```
//! The matrix maps device-local axes to world axes, so its columns are the
//! device axes expressed in world coordinates.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::Vector3;

/// Device attitude as a row-major rotation matrix.
///
/// Orthonormality is the caller's responsibility; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix {
    m: [f64; 9],
}

/// Yaw, pitch and roll in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl RotationMatrix {
    /// Identity attitude
    pub fn identity() -> Self {
        Self::from_row_major([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Wrap nine row-major entries
    pub fn from_row_major(m: [f64; 9]) -> Self {
        Self { m }
    }

    /// Build from three rows
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self::from_row_major([
            r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2],
        ])
    }

    /// Build from three row vectors
    pub fn from_row_vectors(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self::from_rows([r0.into(), r1.into(), r2.into()])
    }

    /// Raw row-major entries
    pub fn as_row_major(&self) -> &[f64; 9] {
        &self.m
    }

    /// Row `i` (0..3)
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.m[3 * i], self.m[3 * i + 1], self.m[3 * i + 2])
    }

    /// Column `j` (0..3), i.e. device axis `j` in world coordinates
    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(self.m[j], self.m[3 + j], self.m[6 + j])
    }

    /// Transposed matrix (the inverse, for a true rotation)
    pub fn transpose(&self) -> Self {
        Self::from_row_vectors(self.column(0), self.column(1), self.column(2))
    }

    /// Matrix-vector product `M * v`
    pub fn mul_vector(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// Yaw, pitch and roll extracted from the row-major layout.
    ///
    /// yaw = atan2(m1, m4), pitch = asin(-m7), roll = atan2(-m6, m8)
    pub fn euler_angles(&self) -> EulerAngles {
        let m = &self.m;
        EulerAngles {
            yaw: m[1].atan2(m[4]),
            pitch: (-m[7]).clamp(-1.0, 1.0).asin(),
            roll: (-m[6]).atan2(m[8]),
        }
    }

    /// True when every entry is finite
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<usize> for RotationMatrix {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.m[index]
    }
}

#[cfg(test)]
impl RotationMatrix {
    /// Matrix product `self * rhs`
    pub(crate) fn mul_matrix(&self, rhs: &RotationMatrix) -> Self {
        let mut out = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                out[3 * i + j] = self.row(i).dot(&rhs.column(j));
            }
        }
        Self::from_row_major(out)
    }

    /// Determinant of the 3x3 matrix
    pub(crate) fn determinant(&self) -> f64 {
        self.row(0).dot(&self.row(1).cross(&self.row(2)))
    }

    /// Whether `M * Mᵀ ≈ I` and `det(M) ≈ +1` within `tolerance`
    pub(crate) fn is_rotation(&self, tolerance: f64) -> bool {
        let product = self.mul_matrix(&self.transpose());
        let identity = Self::identity();
        let orthonormal = product
            .m
            .iter()
            .zip(identity.m.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance);
        orthonormal && (self.determinant() - 1.0).abs() <= tolerance
    }
}
