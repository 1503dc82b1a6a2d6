//! Single-writer task around [`SensorsController`]
//!
//! The controller moves into a tokio task and every mutation (samples,
//! location updates, lifecycle, subscriptions) arrives as a request on one
//! unbounded channel, so they apply in send order and never race. Observers
//! are called on the task.

use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::{ControllerStats, SensorsController};
use crate::error::{ControllerError, Result};
use crate::observer::{OrientationObserver, SubscriptionId};
use crate::sensor::{SensorSample, SensorSet};
use crate::spatial::Point3;

/// Requests handled by the controller task
pub enum ControllerRequest {
    Sample(SensorSample),
    SetDeviceLocation(Point3),
    SetTargetLocation(Point3),
    Start(oneshot::Sender<Result<SensorSet>>),
    Stop,
    Subscribe(Arc<dyn OrientationObserver>, oneshot::Sender<SubscriptionId>),
    Unsubscribe(SubscriptionId, oneshot::Sender<bool>),
    Stats(oneshot::Sender<ControllerStats>),
    Shutdown,
}

/// Cloneable sender side of the controller task
#[derive(Clone)]
pub struct ControllerHandle {
    request_tx: UnboundedSender<ControllerRequest>,
}

/// Move `controller` into a task. The join handle yields the controller back,
/// stopped, after [`ControllerHandle::shutdown`] or once every handle drops.
pub fn spawn_controller(
    controller: SensorsController,
) -> (ControllerHandle, JoinHandle<SensorsController>) {
    let (request_tx, request_rx) = unbounded_channel();
    let task = tokio::spawn(run_controller_loop(controller, request_rx));
    (ControllerHandle { request_tx }, task)
}

async fn run_controller_loop(
    mut controller: SensorsController,
    mut request_rx: UnboundedReceiver<ControllerRequest>,
) -> SensorsController {
    while let Some(request) = request_rx.recv().await {
        match request {
            ControllerRequest::Sample(sample) => {
                controller.on_sample(&sample);
            }
            ControllerRequest::SetDeviceLocation(p) => controller.set_device_location(p),
            ControllerRequest::SetTargetLocation(p) => controller.set_target_location(p),
            ControllerRequest::Start(reply) => {
                let _ = reply.send(controller.start());
            }
            ControllerRequest::Stop => controller.stop(),
            ControllerRequest::Subscribe(observer, reply) => {
                let _ = reply.send(controller.subscribe(observer));
            }
            ControllerRequest::Unsubscribe(id, reply) => {
                let _ = reply.send(controller.unsubscribe(id));
            }
            ControllerRequest::Stats(reply) => {
                let _ = reply.send(controller.stats());
            }
            ControllerRequest::Shutdown => break,
        }
    }

    debug!("Controller task exiting");
    controller.stop();
    controller
}

impl ControllerHandle {
    fn send(&self, request: ControllerRequest) -> Result<()> {
        self.request_tx
            .send(request)
            .map_err(|_| ControllerError::Disconnected)
    }

    async fn ask<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> ControllerRequest,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make(reply_tx))?;
        reply_rx.await.map_err(|_| ControllerError::Disconnected)
    }

    pub fn send_sample(&self, sample: SensorSample) -> Result<()> {
        self.send(ControllerRequest::Sample(sample))
    }

    pub fn set_device_location(&self, location: Point3) -> Result<()> {
        self.send(ControllerRequest::SetDeviceLocation(location))
    }

    pub fn set_target_location(&self, location: Point3) -> Result<()> {
        self.send(ControllerRequest::SetTargetLocation(location))
    }

    pub async fn start(&self) -> Result<SensorSet> {
        self.ask(ControllerRequest::Start).await?
    }

    pub fn stop(&self) -> Result<()> {
        self.send(ControllerRequest::Stop)
    }

    pub async fn subscribe(
        &self,
        observer: Arc<dyn OrientationObserver>,
    ) -> Result<SubscriptionId> {
        self.ask(|reply| ControllerRequest::Subscribe(observer, reply)).await
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> Result<bool> {
        self.ask(|reply| ControllerRequest::Unsubscribe(id, reply)).await
    }

    /// Counters as of every request sent before this one
    pub async fn stats(&self) -> Result<ControllerStats> {
        self.ask(ControllerRequest::Stats).await
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(ControllerRequest::Shutdown)
    }
}
