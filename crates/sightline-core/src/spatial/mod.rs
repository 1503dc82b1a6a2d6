//! Spatial value types
//!
//! All coordinates are `f64` in one consistent, caller-chosen unit. The
//! coordinate frame is the one the rotation matrix maps into; for the
//! standard converter that is X east, Y north, Z up.

mod point3;
mod quaternion;
mod rotation;
mod vector3;

pub use point3::Point3;
pub use quaternion::Quaternion;
pub use rotation::{EulerAngles, RotationMatrix};
pub use vector3::Vector3;
