//! Sample simulator for development without sensor hardware
//!
//! Holds a device attitude (yaw about world up, then pitch about X, then roll
//! about Y) and produces the samples a real device in that attitude would
//! report: a rotation-vector reading, or an accelerometer + magnetometer pair.
//! Each call to [`SampleSimulator::next_samples`] advances yaw by a fixed
//! step.

use crate::sensor::{SensorSample, STANDARD_GRAVITY};
use crate::spatial::{Quaternion, RotationMatrix, Vector3};

/// Which pathway the simulator feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMode {
    RotationVector,
    Raw,
}

/// Simulates one device turning in place
#[derive(Debug, Clone)]
pub struct SampleSimulator {
    /// Current yaw (rotation about world up), radians
    yaw: f64,
    /// Pitch about device X, radians
    pitch: f64,
    /// Roll about device Y, radians
    roll: f64,
    /// Yaw increment per step
    yaw_step: f64,
    /// World magnetic field (east, north, up), microtesla
    field: Vector3,
}

impl Default for SampleSimulator {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            yaw_step: 5f64.to_radians(),
            field: Vector3::new(0.0, 22.0, -40.0),
        }
    }
}

impl SampleSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attitude(mut self, yaw: f64, pitch: f64, roll: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    pub fn with_yaw_step(mut self, step: f64) -> Self {
        self.yaw_step = step;
        self
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn attitude(&self) -> Quaternion {
        Quaternion::from_axis_angle(Vector3::Z, self.yaw)
            * Quaternion::from_axis_angle(Vector3::X, self.pitch)
            * Quaternion::from_axis_angle(Vector3::Y, self.roll)
    }

    /// Device-to-world rotation for the current attitude
    pub fn rotation_matrix(&self) -> RotationMatrix {
        self.attitude().to_rotation_matrix()
    }

    pub fn rotation_vector_sample(&self) -> SensorSample {
        SensorSample::rotation_vector(self.attitude().vector_part())
    }

    /// Accelerometer then magnetometer reading, both in device coordinates
    pub fn raw_samples(&self) -> [SensorSample; 2] {
        let to_device = self.rotation_matrix().transpose();
        let gravity = to_device.mul_vector(&Vector3::new(0.0, 0.0, STANDARD_GRAVITY));
        let field = to_device.mul_vector(&self.field);
        [
            SensorSample::accelerometer(gravity.into()),
            SensorSample::magnetic_field(field.into()),
        ]
    }

    /// Samples for the current attitude, then advance yaw one step
    pub fn next_samples(&mut self, mode: SimulationMode) -> Vec<SensorSample> {
        let samples = match mode {
            SimulationMode::RotationVector => vec![self.rotation_vector_sample()],
            SimulationMode::Raw => self.raw_samples().to_vec(),
        };
        self.yaw += self.yaw_step;
        samples
    }
}
