//! Camera presence tracking
//!
//! Keeps the watch set synchronized with the camera inventory, derives the
//! single aggregate boolean "any allowed camera in use", and fans light state
//! out exactly on transitions of that boolean.

use crate::filter::CameraFilter;
use crate::lights::LightController;
use crate::types::{CameraEvent, CameraHandle};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Diagnostic view of one watched camera.
#[derive(Debug, Clone, Serialize)]
pub struct CameraStatus {
    pub id: String,
    pub name: String,
    pub in_use: bool,
    pub allowed: bool,
}

/// Read-only snapshot of the tracker for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub cameras: Vec<CameraStatus>,
    pub lights: Vec<String>,
    pub any_in_use: bool,
    pub filter_enabled: bool,
}

/// Watches camera events and drives the light controller on edges.
pub struct CameraPresenceTracker {
    cameras: HashMap<String, CameraHandle>,
    filter: CameraFilter,
    lights: Arc<dyn LightController>,
    any_in_use: bool,
    started: bool,
}

impl CameraPresenceTracker {
    pub fn new(filter: CameraFilter, lights: Arc<dyn LightController>) -> Self {
        Self {
            cameras: HashMap::new(),
            filter,
            lights,
            any_in_use: false,
            started: false,
        }
    }

    /// Register the initial camera inventory and converge the lights to it.
    ///
    /// Always fans out once with the initial aggregate so device state matches
    /// reality on (re)start, not just on later edges. Idempotent: a second
    /// call does not duplicate registrations or re-fire the lights.
    pub fn start(&mut self, initial: Vec<CameraHandle>) -> &mut Self {
        if self.started {
            log::warn!("Tracker already started, ignoring");
            return self;
        }
        for camera in initial {
            if self.cameras.contains_key(&camera.id) {
                continue;
            }
            log::info!(
                "Watching camera '{}' (allowed: {})",
                camera.name,
                self.filter.allows(&camera)
            );
            self.cameras.insert(camera.id.clone(), camera);
        }
        self.any_in_use = self.compute_any_in_use();
        self.started = true;
        log::info!(
            "Tracker started with {} camera(s), any_in_use={}",
            self.cameras.len(),
            self.any_in_use
        );
        self.lights.apply_state(self.any_in_use);
        self
    }

    /// Clear the watch set. Lights are left as-is; callers wanting a
    /// deterministic shutdown state issue an explicit lights-off.
    pub fn stop(&mut self) {
        self.cameras.clear();
        self.any_in_use = false;
        self.started = false;
        log::info!("Tracker stopped, lights left as-is");
    }

    /// Dispatch one camera event to the matching handler.
    pub fn handle_event(&mut self, event: CameraEvent) {
        match event {
            CameraEvent::Added(camera) => self.on_camera_added(camera),
            CameraEvent::Removed(id) => self.on_camera_removed(&id),
            CameraEvent::StateChanged(camera) => self.on_camera_state_changed(camera),
        }
    }

    /// A camera appeared. No fan-out here: use-state changes arrive as their
    /// own events, and a newly present idle camera can't change the aggregate.
    pub fn on_camera_added(&mut self, camera: CameraHandle) {
        if self.cameras.contains_key(&camera.id) {
            log::debug!("Camera '{}' already watched", camera.name);
            return;
        }
        log::info!(
            "Camera added: '{}' (allowed: {})",
            camera.name,
            self.filter.allows(&camera)
        );
        self.cameras.insert(camera.id.clone(), camera);
    }

    /// A camera disappeared; recompute in case it was the active one.
    pub fn on_camera_removed(&mut self, id: &str) {
        match self.cameras.remove(id) {
            Some(camera) => {
                log::info!("Camera removed: '{}'", camera.name);
                self.refresh();
            }
            None => log::debug!("Removal for unknown camera id '{}'", id),
        }
    }

    /// A camera's in-use flag changed.
    pub fn on_camera_state_changed(&mut self, camera: CameraHandle) {
        let allowed = self.filter.allows(&camera);
        // Keep the stored handle truthful for status() even when filtered out.
        match self.cameras.get_mut(&camera.id) {
            Some(existing) => {
                existing.in_use = camera.in_use;
                existing.name = camera.name.clone();
            }
            None => {
                self.cameras.insert(camera.id.clone(), camera.clone());
            }
        }
        if !allowed {
            log::debug!(
                "Ignoring state change for filtered-out camera '{}'",
                camera.name
            );
            return;
        }
        self.refresh();
    }

    /// Current aggregate value.
    pub fn any_in_use(&self) -> bool {
        self.any_in_use
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Read-only diagnostic snapshot; never mutates state.
    pub fn status(&self) -> StatusReport {
        let mut cameras: Vec<CameraStatus> = self
            .cameras
            .values()
            .map(|c| CameraStatus {
                id: c.id.clone(),
                name: c.name.clone(),
                in_use: c.in_use,
                allowed: self.filter.allows(c),
            })
            .collect();
        cameras.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        StatusReport {
            cameras,
            lights: self.lights.describe(),
            any_in_use: self.any_in_use,
            filter_enabled: self.filter.is_enabled(),
        }
    }

    /// Recompute the aggregate from a full scan and fan out iff it moved.
    fn refresh(&mut self) {
        let next = self.compute_any_in_use();
        if next != self.any_in_use {
            self.any_in_use = next;
            log::info!("Camera use state changed: any_in_use={}", next);
            self.lights.apply_state(next);
        }
    }

    // Always a full scan over allowed cameras, never an incremental patch.
    fn compute_any_in_use(&self) -> bool {
        self.cameras
            .values()
            .filter(|c| self.filter.allows(c))
            .any(|c| c.in_use)
    }
}
