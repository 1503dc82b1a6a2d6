//! Plane-relative azimuth of the projected target
//!
//! The sine term is the sum of all three components of `X × P`, not the
//! component along the plane normal. The two agree for yaw-only attitudes and
//! drift apart once the device tilts; the quadrant choice below depends on the
//! summed form, so it is kept as is.
//!
//! Under tilt the summed sine can exceed one. It is clamped, so every bearing
//! in the saturated band reports `±π/2`; the engine logs those samples at
//! debug level.

use std::f64::consts::PI;

use crate::spatial::Vector3;

/// Sum of the components of `X × P` over `|X||P|`, unclamped.
///
/// Equals the in-plane sine only while the plane normal is a coordinate
/// axis. Otherwise it can reach `√3` in magnitude, since `X × P` points
/// along the unit normal.
pub fn summed_sine(x_axis: &Vector3, p: &Vector3) -> f64 {
    x_axis.cross(p).component_sum() / (x_axis.magnitude() * p.magnitude())
}

/// Whether the summed sine left `[-1, 1]` by more than float drift
pub fn is_saturated(sin_theta: f64) -> bool {
    sin_theta.abs() > 1.0 + SATURATION_TOLERANCE
}

/// Slack above one still treated as rounding
pub const SATURATION_TOLERANCE: f64 = 1e-9;

/// Cosine and summed sine of the angle from `x_axis` to `p`, both clamped
/// to `[-1, 1]`.
///
/// For the cosine the clamp only absorbs rounding. For the summed sine it
/// also saturates: a tilted plane can push the sum past one for a whole band
/// of bearings, and each of those resolves to exactly `±π/2` (see
/// [`is_saturated`]).
pub fn direction_cosines(x_axis: &Vector3, p: &Vector3) -> (f64, f64) {
    let cos_theta = x_axis.dot(p) / (x_axis.magnitude() * p.magnitude());
    let sin_theta = summed_sine(x_axis, p);
    (cos_theta.clamp(-1.0, 1.0), sin_theta.clamp(-1.0, 1.0))
}

/// Pick the azimuth from the two `asin` branches, using `acos` as reference.
///
/// Each candidate is scored by `min(|c - ref|, |c + ref|)`; the lower score
/// wins and a tie goes to the second branch.
pub fn resolve_quadrant(cos_theta: f64, sin_theta: f64) -> f64 {
    let first = sin_theta.asin();
    let second = if sin_theta >= 0.0 {
        PI - first
    } else {
        -PI - first
    };
    let reference = cos_theta.acos();

    let score = |candidate: f64| (candidate - reference).abs().min((candidate + reference).abs());

    if score(first) < score(second) {
        first
    } else {
        second
    }
}

/// Azimuth of `p` measured in the device plane from `x_axis`
pub fn plane_azimuth(x_axis: &Vector3, p: &Vector3) -> f64 {
    let (cos_theta, sin_theta) = direction_cosines(x_axis, p);
    resolve_quadrant(cos_theta, sin_theta)
}
