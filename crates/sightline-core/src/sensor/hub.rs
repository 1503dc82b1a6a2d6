//! Sensor hub seam
//!
//! The hub owns the real sensors. The controller only asks which streams exist
//! and toggles registration; samples come back through
//! [`SensorsController::on_sample`](crate::controller::SensorsController::on_sample).

use std::time::Duration;

use anyhow::{bail, Result};

use super::{SensorKind, SensorSet};

pub trait SensorHub: Send {
    /// Streams this hub can deliver
    fn available(&self) -> SensorSet;

    /// Start delivering `kind` at roughly `period`
    fn register(&mut self, kind: SensorKind, period: Duration) -> Result<()>;

    /// Stop delivering everything
    fn unregister_all(&mut self);
}

/// Hub without hardware, for simulated or replayed samples
#[derive(Debug, Clone, Default)]
pub struct VirtualHub {
    available: SensorSet,
    registered: Vec<(SensorKind, Duration)>,
}

impl VirtualHub {
    pub fn new(available: SensorSet) -> Self {
        Self {
            available,
            registered: Vec::new(),
        }
    }

    pub fn registered(&self) -> &[(SensorKind, Duration)] {
        &self.registered
    }

    pub fn is_registered(&self, kind: SensorKind) -> bool {
        self.registered.iter().any(|(k, _)| *k == kind)
    }
}

impl SensorHub for VirtualHub {
    fn available(&self) -> SensorSet {
        self.available
    }

    fn register(&mut self, kind: SensorKind, period: Duration) -> Result<()> {
        if !self.available.contains(kind) {
            bail!("sensor {:?} is not available", kind);
        }
        if !self.is_registered(kind) {
            self.registered.push((kind, period));
        }
        Ok(())
    }

    fn unregister_all(&mut self) {
        self.registered.clear();
    }
}
