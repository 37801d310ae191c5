//! Device wire-format tests for the Elgato and WLED encoders.

use camlights::config::{LightConfig, LightKind};
use camlights::lights::{elgato, wled};
use serde_json::json;

#[test]
fn kelvin_to_mireds_reference_values() {
    assert_eq!(elgato::kelvin_to_mireds(4500), 222);
    assert_eq!(elgato::kelvin_to_mireds(7000), 143);
    assert_eq!(elgato::kelvin_to_mireds(2000), 344);
    assert_eq!(elgato::kelvin_to_mireds(2900), 344);
    // Clamp bounds themselves
    assert_eq!(elgato::kelvin_to_mireds(1_000_000), 143);
    assert_eq!(elgato::kelvin_to_mireds(1), 344);
}

#[test]
fn elgato_bodies_match_wire_contract() {
    let device = LightConfig::new(LightKind::Elgato, "192.168.1.42");
    let on = elgato::request(&device, true);
    assert_eq!(on.url, "http://192.168.1.42:9123/elgato/lights");
    assert_eq!(
        on.body,
        json!({"lights": [{"on": 1, "brightness": 50, "temperature": 222}]})
    );

    let off = elgato::request(&device, false);
    assert_eq!(off.url, "http://192.168.1.42:9123/elgato/lights");
    assert_eq!(off.body, json!({"lights": [{"on": 0}]}));
}

#[test]
fn elgato_honors_configured_parameters() {
    let mut device = LightConfig::new(LightKind::Elgato, "key-light.local");
    device.port = Some(9999);
    device.brightness = Some(15);
    device.temperature = Some(2900);
    let on = elgato::request(&device, true);
    assert_eq!(on.url, "http://key-light.local:9999/elgato/lights");
    assert_eq!(
        on.body,
        json!({"lights": [{"on": 1, "brightness": 15, "temperature": 344}]})
    );
}

#[test]
fn wled_preset_and_brightness_are_mutually_exclusive() {
    let mut with_preset = LightConfig::new(LightKind::Wled, "10.0.0.5");
    with_preset.on_preset = Some(2);
    with_preset.brightness = Some(255);
    let on = wled::request(&with_preset, true);
    assert_eq!(on.body, json!({"on": true, "ps": 2}));
    assert!(on.body.get("bri").is_none());

    let without_preset = LightConfig::new(LightKind::Wled, "10.0.0.5");
    let on = wled::request(&without_preset, true);
    assert_eq!(on.body, json!({"on": true, "bri": 128}));
    assert!(on.body.get("ps").is_none());
}

#[test]
fn wled_off_paths() {
    let plain = LightConfig::new(LightKind::Wled, "10.0.0.5");
    assert_eq!(wled::request(&plain, false).body, json!({"on": false}));

    // The off-preset deliberately keeps "on": true; the preset encodes the
    // off-state on the device.
    let mut with_preset = LightConfig::new(LightKind::Wled, "10.0.0.5");
    with_preset.off_preset = Some(7);
    assert_eq!(
        wled::request(&with_preset, false).body,
        json!({"on": true, "ps": 7})
    );
}

#[test]
fn wled_url_uses_plain_address() {
    let device = LightConfig::new(LightKind::Wled, "10.0.0.5:8080");
    let request = wled::request(&device, true);
    assert_eq!(request.url, "http://10.0.0.5:8080/json/state");
}
