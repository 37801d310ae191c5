//! WLED encoder
//!
//! WLED takes a POST to `/json/state`. When a preset id is configured it
//! replaces the brightness field entirely. The off-preset path deliberately
//! sends `"on": true`: the preset itself is expected to encode the off-like
//! state device-side.

use crate::config::LightConfig;
use serde_json::json;

use super::LightRequest;

pub const DEFAULT_BRIGHTNESS: u32 = 128;

/// Encode the on/off command for one WLED controller.
pub fn request(device: &LightConfig, on: bool) -> LightRequest {
    let url = format!("http://{}/json/state", device.address);
    let body = if on {
        match device.on_preset {
            Some(preset) => json!({"on": true, "ps": preset}),
            None => json!({"on": true, "bri": device.brightness.unwrap_or(DEFAULT_BRIGHTNESS)}),
        }
    } else {
        match device.off_preset {
            Some(preset) => json!({"on": true, "ps": preset}),
            None => json!({"on": false}),
        }
    };
    LightRequest { url, body }
}
