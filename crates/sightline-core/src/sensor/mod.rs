//! Sensor-side plumbing: sample types, the raw two-stream join, conversion to
//! rotation matrices and the hub seam.

mod convert;
mod hub;
mod join;
mod sample;

pub use convert::{RotationConverter, StandardConverter, STANDARD_GRAVITY};
pub use hub::{SensorHub, VirtualHub};
pub use join::{RawJoin, RawPair};
pub use sample::{SensorKind, SensorSample, SensorSet};
