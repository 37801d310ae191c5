//! Elgato Key Light encoder
//!
//! The Key Light API takes a PUT to `/elgato/lights` on port 9123 with color
//! temperature in mireds. Values outside [143, 344] mireds are rejected by
//! the device, so the conversion clamps unconditionally.

use crate::config::LightConfig;
use serde_json::json;

use super::LightRequest;

pub const DEFAULT_PORT: u16 = 9123;
pub const DEFAULT_BRIGHTNESS: u32 = 50;
/// Default color temperature in Kelvin; usable device range is 2900-7000.
pub const DEFAULT_TEMPERATURE_K: u32 = 4500;

const MIREDS_MIN: u32 = 143;
const MIREDS_MAX: u32 = 344;

/// Convert Kelvin to the mired value the device expects.
pub fn kelvin_to_mireds(kelvin: u32) -> u32 {
    let mireds = 1_000_000 / kelvin.max(1);
    mireds.clamp(MIREDS_MIN, MIREDS_MAX)
}

/// Encode the on/off command for one Key Light.
pub fn request(device: &LightConfig, on: bool) -> LightRequest {
    let url = format!(
        "http://{}:{}/elgato/lights",
        device.address,
        device.port.unwrap_or(DEFAULT_PORT)
    );
    let body = if on {
        let brightness = device.brightness.unwrap_or(DEFAULT_BRIGHTNESS);
        let mireds = kelvin_to_mireds(device.temperature.unwrap_or(DEFAULT_TEMPERATURE_K));
        json!({"lights": [{"on": 1, "brightness": brightness, "temperature": mireds}]})
    } else {
        json!({"lights": [{"on": 0}]})
    };
    LightRequest { url, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LightKind;

    #[test]
    fn test_kelvin_to_mireds_table() {
        assert_eq!(kelvin_to_mireds(4500), 222);
        assert_eq!(kelvin_to_mireds(7000), 143);
        assert_eq!(kelvin_to_mireds(2000), 344); // raw 500, clamped
        assert_eq!(kelvin_to_mireds(2900), 344); // raw 344.8, floored in range
        assert_eq!(kelvin_to_mireds(0), 344); // guarded division
    }

    #[test]
    fn test_on_body_defaults() {
        let device = LightConfig::new(LightKind::Elgato, "192.168.1.20");
        let request = request(&device, true);
        assert_eq!(request.url, "http://192.168.1.20:9123/elgato/lights");
        assert_eq!(
            request.body,
            serde_json::json!({"lights": [{"on": 1, "brightness": 50, "temperature": 222}]})
        );
    }

    #[test]
    fn test_off_body() {
        let device = LightConfig::new(LightKind::Elgato, "192.168.1.20");
        let request = request(&device, false);
        assert_eq!(request.body, serde_json::json!({"lights": [{"on": 0}]}));
    }

    #[test]
    fn test_custom_port_and_parameters() {
        let mut device = LightConfig::new(LightKind::Elgato, "10.0.0.7");
        device.port = Some(9200);
        device.brightness = Some(80);
        device.temperature = Some(7000);
        let request = request(&device, true);
        assert_eq!(request.url, "http://10.0.0.7:9200/elgato/lights");
        assert_eq!(
            request.body,
            serde_json::json!({"lights": [{"on": 1, "brightness": 80, "temperature": 143}]})
        );
    }

    #[test]
    fn test_out_of_range_brightness_passes_through() {
        let mut device = LightConfig::new(LightKind::Elgato, "10.0.0.7");
        device.brightness = Some(150);
        let request = request(&device, true);
        assert_eq!(request.body["lights"][0]["brightness"], 150);
    }
}
