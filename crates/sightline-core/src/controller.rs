//! Sensors controller
//!
//! Owns the engine, the location store, the raw-stream join and the observer
//! registry, and routes incoming samples down one of two pathways:
//!
//! - rotation vector: every sample converts to a matrix and is calculated
//!   immediately, tagged [`SourceTag::RotationVector`]
//! - raw: accelerometer and magnetometer samples feed [`RawJoin`]; each
//!   released pair is converted and calculated, tagged [`SourceTag::Raw`]
//!
//! Everything runs on the caller's thread. For concurrent use, wrap the
//! controller with [`crate::actor::spawn_controller`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SightlineConfig;
use crate::engine::{OrientationEngine, OrientationResult, SourceTag};
use crate::error::{ControllerError, EngineError, Result};
use crate::location::{LocationSnapshot, LocationStore};
use crate::observer::{ObserverRegistry, OrientationObserver, SubscriptionId};
use crate::sensor::{
    RawPair, RawJoin, RotationConverter, SensorHub, SensorKind, SensorSample, SensorSet,
    StandardConverter,
};
use crate::spatial::{Point3, RotationMatrix};

/// Running counters, mostly for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Samples accepted while started
    pub samples: u64,
    /// Engine invocations
    pub calculations: u64,
    /// Results delivered to observers
    pub broadcasts: u64,
    /// Samples dropped by the engine or the converter
    pub skipped: u64,
}

pub struct SensorsController {
    engine: OrientationEngine,
    locations: LocationStore,
    join: RawJoin,
    observers: ObserverRegistry,
    converter: Box<dyn RotationConverter>,
    hub: Box<dyn SensorHub>,
    sample_period: Duration,
    active: bool,
    skip_streak: u64,
    stats: ControllerStats,
}

impl std::fmt::Debug for SensorsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorsController")
            .field("active", &self.active)
            .field("locations", &self.locations)
            .field("observers", &self.observers)
            .field("stats", &self.stats)
            .finish()
    }
}

impl SensorsController {
    /// Build a stopped controller from configuration, with the standard
    /// rotation converter
    pub fn new(config: &SightlineConfig, hub: Box<dyn SensorHub>) -> Self {
        Self {
            engine: OrientationEngine::new(config.engine.clone()),
            locations: LocationStore::new(config.locations.device, config.locations.target),
            join: RawJoin::new(),
            observers: ObserverRegistry::new(),
            converter: Box::new(StandardConverter),
            hub,
            sample_period: config.sensors.sample_period(),
            active: false,
            skip_streak: 0,
            stats: ControllerStats::default(),
        }
    }

    /// Replace the rotation converter
    pub fn with_converter(mut self, converter: Box<dyn RotationConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Register with every available sensor.
    ///
    /// Fails with [`ControllerError::NoSensors`] when neither pathway is
    /// usable. Calling it while already started is a no-op.
    pub fn start(&mut self) -> Result<SensorSet> {
        let available = self.hub.available();
        if self.active {
            return Ok(available);
        }

        if !available.is_usable() {
            return Err(ControllerError::NoSensors);
        }
        if !available.has_rotation_vector() {
            warn!("No rotation-vector sensor; only the raw pathway will report");
        } else if !available.has_raw_pair() {
            warn!(
                "Accelerometer/magnetometer pair incomplete; \
                 only the rotation-vector pathway will report"
            );
        }

        for kind in available.kinds() {
            if let Err(e) = self.hub.register(kind, self.sample_period) {
                self.hub.unregister_all();
                return Err(ControllerError::Hub(e.to_string()));
            }
        }

        self.active = true;
        info!(
            period_us = self.sample_period.as_micros() as u64,
            "Sensors controller started"
        );
        Ok(available)
    }

    /// Unregister from all sensors. Cached raw readings keep their values but
    /// lose their fresh flags.
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.hub.unregister_all();
            self.join.reset();
            info!("Sensors controller stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_device_location(&mut self, location: Point3) {
        self.locations.set_device_location(location);
    }

    pub fn set_target_location(&mut self, location: Point3) {
        self.locations.set_target_location(location);
    }

    pub fn locations(&self) -> LocationSnapshot {
        self.locations.snapshot()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn OrientationObserver>) -> SubscriptionId {
        self.observers.register(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unregister(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Run the engine against the current locations without broadcasting
    pub fn calculate(
        &self,
        source: SourceTag,
        rotation: &RotationMatrix,
    ) -> std::result::Result<OrientationResult, EngineError> {
        self.engine.calculate(source, rotation, &self.locations.snapshot())
    }

    /// Feed one sensor sample. Returns the broadcast result when the sample
    /// completed a calculation. Ignored while stopped.
    pub fn on_sample(&mut self, sample: &SensorSample) -> Option<OrientationResult> {
        if !self.active {
            debug!(kind = ?sample.kind, "Sample ignored, controller stopped");
            return None;
        }
        self.stats.samples += 1;

        match sample.kind {
            SensorKind::RotationVector => {
                let rotation = self.converter.from_rotation_vector(sample.values);
                self.on_rotation_matrix(SourceTag::RotationVector, &rotation)
            }
            SensorKind::Accelerometer => {
                let pair = self.join.push_accelerometer(sample.values)?;
                self.on_raw_pair(pair)
            }
            SensorKind::MagneticField => {
                let pair = self.join.push_magnetometer(sample.values)?;
                self.on_raw_pair(pair)
            }
        }
    }

    /// Calculate and broadcast for a matrix the caller already has
    pub fn on_rotation_matrix(
        &mut self,
        source: SourceTag,
        rotation: &RotationMatrix,
    ) -> Option<OrientationResult> {
        self.stats.calculations += 1;
        match self.calculate(source, rotation) {
            Ok(result) => {
                self.skip_streak = 0;
                self.observers.broadcast(&result);
                self.stats.broadcasts += 1;
                Some(result)
            }
            Err(e) => {
                self.record_skip(source, &e.to_string());
                None
            }
        }
    }

    fn on_raw_pair(&mut self, pair: RawPair) -> Option<OrientationResult> {
        match self
            .converter
            .from_gravity_and_geomagnetic(pair.gravity, pair.geomagnetic)
        {
            Some(rotation) => self.on_rotation_matrix(SourceTag::Raw, &rotation),
            None => {
                self.record_skip(
                    SourceTag::Raw,
                    "accelerometer/magnetometer pair defines no attitude",
                );
                None
            }
        }
    }

    // First skip of a streak is a warning, the rest are debug noise
    fn record_skip(&mut self, source: SourceTag, reason: &str) {
        self.stats.skipped += 1;
        if self.skip_streak == 0 {
            warn!(source = %source, "Sample skipped: {}", reason);
        } else {
            debug!(source = %source, streak = self.skip_streak, "Sample skipped: {}", reason);
        }
        self.skip_streak += 1;
    }
}
