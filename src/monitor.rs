//! Camera inventory monitoring
//!
//! Polls the platform camera list, diffs it against the previous scan, and
//! emits `CameraEvent`s for connects, disconnects, and in-use transitions.
//! Any backend that produces the same events can replace this one; the
//! tracker only sees the event channel.

use crate::config::MonitorConfig;
use crate::errors::CamLightsError;
use crate::types::{CameraEvent, CameraHandle};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

/// Polling camera monitor.
pub struct DeviceMonitor {
    poll_interval: Duration,
    cameras: Arc<RwLock<HashMap<String, CameraHandle>>>,
    event_sender: mpsc::UnboundedSender<CameraEvent>,
    event_receiver: Arc<RwLock<mpsc::UnboundedReceiver<CameraEvent>>>,
    is_monitoring: Arc<RwLock<bool>>,
}

impl DeviceMonitor {
    /// Create a new monitor; nothing is scanned until `start_monitoring`.
    pub fn new(config: &MonitorConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            cameras: Arc::new(RwLock::new(HashMap::new())),
            event_sender: tx,
            event_receiver: Arc::new(RwLock::new(rx)),
            is_monitoring: Arc::new(RwLock::new(false)),
        }
    }

    /// Run the initial scan and spawn the polling task. Idempotent.
    pub async fn start_monitoring(&self) -> Result<(), CamLightsError> {
        let mut is_monitoring = self.is_monitoring.write().await;
        if *is_monitoring {
            return Ok(());
        }

        log::info!(
            "Starting camera monitoring (poll interval {:?})",
            self.poll_interval
        );

        let initial = scan()?;
        apply_scan(&mut *self.cameras.write().await, initial, &self.event_sender);
        *is_monitoring = true;

        let cameras = self.cameras.clone();
        let event_sender = self.event_sender.clone();
        let monitoring = self.is_monitoring.clone();
        let interval = self.poll_interval;

        tokio::spawn(async move {
            while *monitoring.read().await {
                tokio::time::sleep(interval).await;

                match scan() {
                    Ok(found) => {
                        let mut cameras = cameras.write().await;
                        apply_scan(&mut cameras, found, &event_sender);
                    }
                    Err(e) => log::debug!("Camera scan failed: {}", e),
                }
            }
        });

        Ok(())
    }

    /// Stop the polling task after its current cycle. Idempotent.
    pub async fn stop_monitoring(&self) {
        let mut is_monitoring = self.is_monitoring.write().await;
        if !*is_monitoring {
            return;
        }
        log::info!("Stopping camera monitoring");
        *is_monitoring = false;
    }

    pub async fn is_monitoring(&self) -> bool {
        *self.is_monitoring.read().await
    }

    /// Get next camera event (non-blocking)
    pub async fn poll_event(&self) -> Option<CameraEvent> {
        let mut rx = self.event_receiver.write().await;
        rx.try_recv().ok()
    }

    /// Wait for next camera event (blocking)
    pub async fn wait_for_event(&self) -> Option<CameraEvent> {
        let mut rx = self.event_receiver.write().await;
        rx.recv().await
    }

    /// Currently known cameras.
    pub async fn snapshot(&self) -> Vec<CameraHandle> {
        let cameras = self.cameras.read().await;
        cameras.values().cloned().collect()
    }
}

/// Diff a fresh scan against the known inventory, emitting events for every
/// difference and updating the inventory in place.
fn apply_scan(
    cameras: &mut HashMap<String, CameraHandle>,
    found: Vec<CameraHandle>,
    sender: &mpsc::UnboundedSender<CameraEvent>,
) {
    let found_ids: Vec<String> = found.iter().map(|c| c.id.clone()).collect();

    // Disconnections first, so removals are observed before replacements.
    let gone: Vec<String> = cameras
        .keys()
        .filter(|id| !found_ids.contains(*id))
        .cloned()
        .collect();
    for id in gone {
        if let Some(camera) = cameras.remove(&id) {
            log::info!("Camera disconnected: '{}'", camera.name);
            let _ = sender.send(CameraEvent::Removed(id));
        }
    }

    for camera in found {
        match cameras.get_mut(&camera.id) {
            Some(existing) => {
                if existing.in_use != camera.in_use {
                    log::debug!("Camera '{}' in_use -> {}", camera.name, camera.in_use);
                    existing.in_use = camera.in_use;
                    let _ = sender.send(CameraEvent::StateChanged(camera));
                }
            }
            None => {
                log::info!("Camera connected: '{}'", camera.name);
                cameras.insert(camera.id.clone(), camera.clone());
                let _ = sender.send(CameraEvent::Added(camera.clone()));
                if camera.in_use {
                    // A camera that shows up already active still needs a
                    // state event; adds alone never move the aggregate.
                    let _ = sender.send(CameraEvent::StateChanged(camera));
                }
            }
        }
    }
}

/// Enumerate cameras via the platform backend.
pub fn scan() -> Result<Vec<CameraHandle>, CamLightsError> {
    use nokhwa::query;
    use nokhwa::utils::ApiBackend;

    let cameras = query(ApiBackend::Auto)
        .map_err(|e| CamLightsError::MonitorError(format!("Failed to query cameras: {}", e)))?;

    Ok(cameras
        .into_iter()
        .map(|info| {
            let id = format!("{}", info.index().as_index().unwrap_or(0));
            let in_use = probe_in_use(&id);
            CameraHandle {
                id,
                name: info.human_name(),
                in_use,
            }
        })
        .collect())
}

/// Best-effort in-use probe: a camera counts as in use when some process
/// holds the matching /dev/video node open.
#[cfg(target_os = "linux")]
fn probe_in_use(id: &str) -> bool {
    use std::path::Path;

    let target = format!("/dev/video{}", id);
    let target = Path::new(&target);

    let proc_dir = match std::fs::read_dir("/proc") {
        Ok(dir) => dir,
        Err(_) => return false,
    };
    for entry in proc_dir.flatten() {
        let name = entry.file_name();
        if !name.to_string_lossy().chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let fds = match std::fs::read_dir(entry.path().join("fd")) {
            Ok(fds) => fds,
            Err(_) => continue, // not our process, or it exited
        };
        for fd in fds.flatten() {
            if let Ok(link) = std::fs::read_link(fd.path()) {
                if link == target {
                    return true;
                }
            }
        }
    }
    false
}

/// In-use detection needs a platform media-session API here; the polling
/// backend reports presence only. A richer backend can replace this monitor
/// entirely through the event channel.
#[cfg(not(target_os = "linux"))]
fn probe_in_use(_id: &str) -> bool {
    false
}
