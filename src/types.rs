//! Core data types shared across the crate.

use serde::{Deserialize, Serialize};

/// One camera known to the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraHandle {
    /// Stable identifier, unique within the watch set.
    pub id: String,
    /// Human-readable display name as reported by the platform.
    pub name: String,
    /// Whether some process currently holds the camera open.
    pub in_use: bool,
}

impl CameraHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            in_use: false,
        }
    }

    pub fn with_in_use(mut self, in_use: bool) -> Self {
        self.in_use = in_use;
        self
    }
}

/// Camera lifecycle events, the contract between any camera backend
/// and the presence tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    Added(CameraHandle),
    Removed(String), // Camera ID
    StateChanged(CameraHandle),
}
