//! Device and target positions
//!
//! The store holds the two points the engine measures between. Setters never
//! reject input and never trigger a calculation; the next sample picks up the
//! new values through [`LocationStore::snapshot`].

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3, Vector3};

/// Immutable copy of both locations, taken once per calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub device: Point3,
    pub target: Point3,
}

impl LocationSnapshot {
    pub fn new(device: Point3, target: Point3) -> Self {
        Self { device, target }
    }

    /// Vector from the device to the target
    pub fn target_vector(&self) -> Vector3 {
        self.target - self.device
    }
}

/// Current device and target positions, last write wins
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    device: Point3,
    target: Point3,
}

impl LocationStore {
    pub fn new(device: Point3, target: Point3) -> Self {
        Self { device, target }
    }

    /// Replace the device position
    pub fn set_device_location(&mut self, location: Point3) {
        self.device = location;
    }

    /// Replace the target position
    pub fn set_target_location(&mut self, location: Point3) {
        self.target = location;
    }

    pub fn device_location(&self) -> Point3 {
        self.device
    }

    pub fn target_location(&self) -> Point3 {
        self.target
    }

    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot::new(self.device, self.target)
    }

    pub fn target_vector(&self) -> Vector3 {
        self.snapshot().target_vector()
    }
}
