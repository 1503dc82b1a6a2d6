//! Device plane and projection of the target onto it
//!
//! The plane through the device origin is spanned by the first two columns of
//! the rotation matrix. `P` is found from three linear equations: `P` lies on
//! the plane, and two components of `(T - P) × n = 0` hold. Which two
//! components are used depends on the dominant component of `n`; the layout for
//! a dominant `A` is
//!
//! ```text
//!   [ B  -A   0 ] [Px]   [T.x·B − T.y·A]
//!   [ C   0  -A ] [Py] = [T.x·C − T.z·A]
//!   [ A   B   C ] [Pz]   [      0      ]
//! ```
//!
//! and its determinant is `A·|n|²`. Pivoting on the largest component keeps
//! the system regular for any attitude whose X and Y axes are not parallel.

use nalgebra::{Matrix3, Vector3 as Column3};

use crate::error::EngineError;
use crate::spatial::{Point3, RotationMatrix, Vector3};

/// Horizontal sensing plane of the device, through the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePlane {
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    /// `(A, B, C)` of `A·x + B·y + C·z = 0`
    pub normal: Vector3,
}

/// Solution of the projection system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub point: Point3,
    pub determinant: f64,
}

impl DevicePlane {
    /// Extract the plane from columns 0 and 1 of the rotation matrix, used as-is
    pub fn from_rotation(rotation: &RotationMatrix) -> Self {
        let x_axis = rotation.column(0);
        let y_axis = rotation.column(1);
        Self {
            x_axis,
            y_axis,
            normal: x_axis.cross(&y_axis),
        }
    }

    /// Coefficient matrix and right-hand side for target vector `t`
    pub fn system(&self, t: &Vector3) -> (Matrix3<f64>, Column3<f64>) {
        let Vector3 { x: a, y: b, z: c } = self.normal;

        match self.normal.dominant_axis() {
            0 => (
                Matrix3::new(
                    b, -a, 0.0, //
                    c, 0.0, -a, //
                    a, b, c,
                ),
                Column3::new(t.x * b - t.y * a, t.x * c - t.z * a, 0.0),
            ),
            1 => (
                Matrix3::new(
                    b, -a, 0.0, //
                    0.0, c, -b, //
                    a, b, c,
                ),
                Column3::new(t.x * b - t.y * a, t.y * c - t.z * b, 0.0),
            ),
            _ => (
                Matrix3::new(
                    0.0, c, -b, //
                    -c, 0.0, a, //
                    a, b, c,
                ),
                Column3::new(t.y * c - t.z * b, t.z * a - t.x * c, 0.0),
            ),
        }
    }

    /// Project `t` onto the plane along the normal.
    ///
    /// Fails with [`EngineError::DegenerateProjection`] when the determinant's
    /// magnitude is below `singular_epsilon` or the LU solve breaks down.
    pub fn project(&self, t: &Vector3, singular_epsilon: f64) -> Result<Projection, EngineError> {
        let (m, rhs) = self.system(t);
        let determinant = m.determinant();
        if !determinant.is_finite() || determinant.abs() < singular_epsilon {
            return Err(EngineError::DegenerateProjection { determinant });
        }

        let solution = m
            .lu()
            .solve(&rhs)
            .ok_or(EngineError::DegenerateProjection { determinant })?;

        Ok(Projection {
            point: Point3::new(solution[0], solution[1], solution[2]),
            determinant,
        })
    }
}

/// `(O - P) · (T - P)` with `O` the device origin
pub fn self_check(projection: &Point3, t: &Vector3) -> f64 {
    let p = projection.to_vector();
    (-p).dot(&(*t - p))
}
