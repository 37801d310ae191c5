//! Configuration round-trip and validation tests.

use camlights::config::{CamLightsConfig, FilterMode, LightConfig, LightKind};

#[test]
fn full_config_parses() {
    let config: CamLightsConfig = toml::from_str(
        r#"
        [[lights]]
        kind = "elgato"
        address = "192.168.1.20"
        brightness = 60
        temperature = 5000

        [[lights]]
        kind = "wled"
        address = "192.168.1.30"
        on_preset = 1
        off_preset = 2

        [filter]
        mode = "pattern"
        pattern = "^Logitech"

        [http]
        timeout_ms = 5000

        [monitor]
        poll_interval_ms = 1000
        "#,
    )
    .unwrap();

    assert_eq!(config.lights.len(), 2);
    assert_eq!(config.lights[0].kind, LightKind::Elgato);
    assert_eq!(config.lights[0].brightness, Some(60));
    assert_eq!(config.lights[1].on_preset, Some(1));
    assert_eq!(config.filter.mode, FilterMode::Pattern);
    assert_eq!(config.http.timeout_ms, 5000);
    assert_eq!(config.monitor.poll_interval_ms, 1000);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_config_is_all_defaults() {
    let config: CamLightsConfig = toml::from_str("").unwrap();
    assert!(config.lights.is_empty());
    assert_eq!(config.filter.mode, FilterMode::All);
    assert_eq!(config.http.timeout_ms, 3000);
    assert!(config.validate().is_ok());
}

#[test]
fn unrecognized_kind_becomes_unknown_not_an_error() {
    let config: CamLightsConfig = toml::from_str(
        r#"
        [[lights]]
        kind = "philips-hue"
        address = "10.0.0.9"

        [[lights]]
        kind = "wled"
        address = "10.0.0.10"
        "#,
    )
    .unwrap();
    assert_eq!(config.lights[0].kind, LightKind::Unknown);
    assert_eq!(config.lights[1].kind, LightKind::Wled);
}

#[test]
fn save_and_reload_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("camlights.toml");

    let mut config = CamLightsConfig::default();
    let mut elgato = LightConfig::new(LightKind::Elgato, "192.168.1.20");
    elgato.brightness = Some(70);
    config.lights.push(elgato);
    config.filter.mode = FilterMode::List;
    config.filter.names = vec!["Logitech BRIO".to_string()];

    config.save_to_file(&path).unwrap();
    let loaded = CamLightsConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded.lights, config.lights);
    assert_eq!(loaded.filter.mode, FilterMode::List);
    assert_eq!(loaded.filter.names, config.filter.names);
}

#[test]
fn validation_rejects_broken_configs() {
    let mut missing_address = CamLightsConfig::default();
    missing_address
        .lights
        .push(LightConfig::new(LightKind::Wled, "  "));
    assert!(missing_address.validate().is_err());

    let mut zero_timeout = CamLightsConfig::default();
    zero_timeout.http.timeout_ms = 0;
    assert!(zero_timeout.validate().is_err());

    let mut zero_poll = CamLightsConfig::default();
    zero_poll.monitor.poll_interval_ms = 0;
    assert!(zero_poll.validate().is_err());
}
