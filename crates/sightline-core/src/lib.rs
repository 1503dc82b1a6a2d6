//! sightline-core: device attitude and plane-relative target aiming
//!
//! This crate provides:
//! - Spatial value types (points, vectors, quaternions, row-major rotation matrices)
//! - A location store for the device and target positions
//! - The orientation engine: yaw/pitch/roll, projection of the target onto the
//!   device plane, plane-relative azimuth and inclination, and a self-check
//! - Two sensor pathways (rotation vector, accelerometer + magnetometer join)
//! - Token-based result observers
//! - A tokio single-writer wrapper for concurrent callers
//! - TOML configuration and a sample simulator

pub mod actor;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod location;
pub mod observer;
pub mod sensor;
pub mod simulator;
pub mod spatial;

// Re-export commonly used types
pub use actor::{spawn_controller, ControllerHandle, ControllerRequest};
pub use config::{EngineConfig, SightlineConfig};
pub use controller::{ControllerStats, SensorsController};
pub use engine::{OrientationEngine, OrientationResult, SourceTag};
pub use error::{ConfigError, ControllerError, EngineError};
pub use location::{LocationSnapshot, LocationStore};
pub use observer::{ObserverRegistry, OrientationObserver, SubscriptionId};
pub use sensor::{SensorHub, SensorKind, SensorSample, SensorSet, VirtualHub};
pub use simulator::{SampleSimulator, SimulationMode};
pub use spatial::{EulerAngles, Point3, Quaternion, RotationMatrix, Vector3};
