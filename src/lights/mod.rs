//! Light device fan-out
//!
//! Translates the aggregate "any camera in use" boolean into one best-effort
//! HTTP command per configured device. Devices are independent: a failure on
//! one never stops the rest, and no send blocks the camera event loop.

pub mod elgato;
pub mod wled;

use crate::config::{HttpConfig, LightConfig, LightKind};
use crate::errors::CamLightsError;
use std::time::Duration;

/// One encoded device command.
pub struct LightRequest {
    pub url: String,
    pub body: serde_json::Value,
}

/// Seam between the tracker and whatever applies light state.
pub trait LightController: Send + Sync {
    /// Apply the desired on/off state to every configured device, best-effort.
    fn apply_state(&self, on: bool);

    /// Human-readable description of each configured device.
    fn describe(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Fans the desired state out to the configured devices over HTTP.
pub struct LightFanOut {
    client: reqwest::Client,
    devices: Vec<LightConfig>,
}

impl LightFanOut {
    pub fn new(devices: Vec<LightConfig>, http: &HttpConfig) -> Result<Self, CamLightsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(http.timeout_ms))
            .build()
            .map_err(|e| {
                CamLightsError::TransportError(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client, devices })
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Build the outbound request for one device.
    fn build_request(
        &self,
        device: &LightConfig,
        on: bool,
    ) -> Result<reqwest::RequestBuilder, CamLightsError> {
        if device.address.trim().is_empty() {
            return Err(CamLightsError::ConfigError("address is required".to_string()));
        }
        match device.kind {
            LightKind::Elgato => {
                let request = elgato::request(device, on);
                Ok(self.client.put(&request.url).json(&request.body))
            }
            LightKind::Wled => {
                let request = wled::request(device, on);
                Ok(self.client.post(&request.url).json(&request.body))
            }
            LightKind::Unknown => Err(CamLightsError::ConfigError(
                "unrecognized device kind".to_string(),
            )),
        }
    }

    /// Fan out and wait for every send to finish.
    ///
    /// Sends are still issued concurrently; this only delays the caller, not
    /// the devices. Used by one-shot CLI commands and tests.
    pub async fn apply_state_and_wait(&self, on: bool) {
        let mut handles = Vec::new();
        for device in &self.devices {
            match self.build_request(device, on) {
                Ok(request) => {
                    handles.push(tokio::spawn(send(request, device.label(), on)));
                }
                Err(e) => log::warn!("Skipping light {}: {}", device.label(), e),
            }
        }
        for handle in handles {
            let _ = handle.await;
        }
    }
}

impl LightController for LightFanOut {
    fn apply_state(&self, on: bool) {
        for device in &self.devices {
            match self.build_request(device, on) {
                Ok(request) => {
                    // Fire-and-forget: a slow or unreachable device must not
                    // stall later devices or camera event processing.
                    tokio::spawn(send(request, device.label(), on));
                }
                Err(e) => log::warn!("Skipping light {}: {}", device.label(), e),
            }
        }
    }

    fn describe(&self) -> Vec<String> {
        self.devices.iter().map(LightConfig::describe).collect()
    }
}

/// Send one device command and log the outcome. No retries: the next edge
/// transition is the only retry mechanism.
async fn send(request: reqwest::RequestBuilder, label: String, on: bool) {
    match request.send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                log::info!("{}: applied on={}", label, on);
            } else {
                log::warn!("{}: device returned HTTP {}", label, status.as_u16());
            }
        }
        // Devices on other networks are expected to be unreachable; keep
        // transport failures out of the warning stream.
        Err(e) => log::debug!("{}: unreachable ({})", label, e),
    }
}
