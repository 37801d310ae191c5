//! Session wiring
//!
//! Builds the filter, fan-out, and tracker from one configuration and pumps
//! monitor events into the tracker. A single consumer task processes events
//! one at a time, so handlers run to completion and the watch set never
//! observes a torn update.

use crate::config::CamLightsConfig;
use crate::errors::CamLightsError;
use crate::filter::CameraFilter;
use crate::lights::{LightController, LightFanOut};
use crate::monitor::DeviceMonitor;
use crate::tracker::{CameraPresenceTracker, StatusReport};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One running camera-to-lights pipeline.
pub struct LightsSession {
    monitor: DeviceMonitor,
    tracker: Arc<RwLock<CameraPresenceTracker>>,
    lights: Arc<LightFanOut>,
}

impl LightsSession {
    pub fn new(config: &CamLightsConfig) -> Result<Self, CamLightsError> {
        let filter = CameraFilter::from_config(&config.filter)?;
        let lights = Arc::new(LightFanOut::new(config.lights.clone(), &config.http)?);
        let tracker = CameraPresenceTracker::new(
            filter,
            lights.clone() as Arc<dyn LightController>,
        );
        Ok(Self {
            monitor: DeviceMonitor::new(&config.monitor),
            tracker: Arc::new(RwLock::new(tracker)),
            lights,
        })
    }

    /// Start the monitor and seed the tracker with the current inventory.
    /// The tracker fans out the initial state so devices converge to reality.
    pub async fn start(&self) -> Result<(), CamLightsError> {
        self.monitor.start_monitoring().await?;
        let initial = self.monitor.snapshot().await;
        self.tracker.write().await.start(initial);
        Ok(())
    }

    /// Process camera events until the channel closes or the caller drops the
    /// future (e.g. via select with a shutdown signal).
    pub async fn run(&self) {
        while let Some(event) = self.monitor.wait_for_event().await {
            self.tracker.write().await.handle_event(event);
        }
    }

    /// Stop monitoring and clear the tracker. Lights are left as-is.
    pub async fn stop(&self) {
        self.monitor.stop_monitoring().await;
        self.tracker.write().await.stop();
    }

    /// Diagnostic snapshot of the tracker.
    pub async fn status(&self) -> StatusReport {
        self.tracker.read().await.status()
    }

    /// Force every configured device on, waiting for the sends.
    pub async fn lights_on(&self) {
        self.lights.apply_state_and_wait(true).await;
    }

    /// Force every configured device off, waiting for the sends.
    pub async fn lights_off(&self) {
        self.lights.apply_state_and_wait(false).await;
    }
}
