//! Subcommand drivers

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use sightline_core::{
    spawn_controller, ControllerHandle, ControllerStats, OrientationObserver, SampleSimulator,
    SensorSet, SensorsController, SightlineConfig, SimulationMode, VirtualHub,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cli::SimulateArgs;
use crate::replay::load as load_replay;

struct Session {
    handle: ControllerHandle,
    task: JoinHandle<SensorsController>,
}

impl Session {
    async fn start(
        config: &SightlineConfig,
        observer: Arc<dyn OrientationObserver>,
    ) -> Result<Self> {
        let hub = VirtualHub::new(SensorSet::all());
        let controller = SensorsController::new(config, Box::new(hub));
        let (handle, task) = spawn_controller(controller);

        handle.subscribe(observer).await?;
        let available = handle
            .start()
            .await
            .context("Failed to start sensors controller")?;
        debug!(?available, "Controller started");

        Ok(Self { handle, task })
    }

    async fn finish(self) -> Result<ControllerStats> {
        let stats = self.handle.stats().await?;
        self.handle.shutdown()?;
        self.task.await.context("Controller task failed")?;

        info!(
            samples = stats.samples,
            results = stats.broadcasts,
            skipped = stats.skipped,
            "Run complete"
        );
        Ok(stats)
    }
}

/// Sweep a simulated device through `args.steps` yaw increments
pub async fn simulate(
    config: &SightlineConfig,
    args: &SimulateArgs,
    observer: Arc<dyn OrientationObserver>,
) -> Result<ControllerStats> {
    let mode = if args.raw {
        SimulationMode::Raw
    } else {
        SimulationMode::RotationVector
    };
    info!(steps = args.steps, ?mode, "Simulating device sweep");

    let session = Session::start(config, observer).await?;
    let mut simulator = SampleSimulator::new()
        .with_attitude(0.0, args.pitch.to_radians(), 0.0)
        .with_yaw_step(args.yaw_step.to_radians());

    for _ in 0..args.steps {
        for sample in simulator.next_samples(mode) {
            session.handle.send_sample(sample)?;
        }
    }

    session.finish().await
}

/// Feed every record of a replay file in order
pub async fn replay(
    config: &SightlineConfig,
    path: &Path,
    observer: Arc<dyn OrientationObserver>,
) -> Result<ControllerStats> {
    let records = load_replay(path)?;
    info!(records = records.len(), "Replaying {}", path.display());

    let session = Session::start(config, observer).await?;
    for record in &records {
        record.apply(&session.handle)?;
    }

    session.finish().await
}
