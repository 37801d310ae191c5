//! Testing utilities for camlights
//!
//! Offline stand-ins for the network and camera layers so tracker behavior
//! can be exercised without hardware or a network.

use crate::lights::LightController;
use crate::types::CameraHandle;
use std::sync::Mutex;

/// Build a camera handle in one call.
pub fn camera(id: &str, name: &str, in_use: bool) -> CameraHandle {
    CameraHandle::new(id, name).with_in_use(in_use)
}

/// A `LightController` that records every applied state instead of sending
/// anything over the network.
#[derive(Debug, Default)]
pub struct RecordingLights {
    states: Mutex<Vec<bool>>,
}

impl RecordingLights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every state applied so far, in order.
    pub fn applied(&self) -> Vec<bool> {
        self.states.lock().expect("lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.states.lock().expect("lock poisoned").len()
    }
}

impl LightController for RecordingLights {
    fn apply_state(&self, on: bool) {
        self.states.lock().expect("lock poisoned").push(on);
    }

    fn describe(&self) -> Vec<String> {
        vec!["recording stub".to_string()]
    }
}
