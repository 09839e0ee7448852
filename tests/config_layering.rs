use std::fs;

use tilt_ball::core::config::{DeviceOrientation, TiltSource};
use tilt_ball::GameConfig;

#[test]
fn shipped_config_parses_and_validates() {
    let cfg = GameConfig::load_from_file("assets/config/game.ron").expect("shipped game.ron");
    assert_eq!(cfg, GameConfig::default());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn local_layer_overrides_nested_keys_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    fs::write(
        &base,
        r#"(
            tilt: (source: "Accelerometer", orientation: "Portrait", scale: 40.0),
            rules: (start_lives: 3),
        )"#,
    )
    .expect("write base");
    fs::write(&local, r#"(tilt: (source: "Pointer"))"#).expect("write local");

    let (cfg, used, errors) = GameConfig::load_layered([&base, &local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.tilt.source, TiltSource::Pointer);
    assert_eq!(cfg.tilt.orientation, DeviceOrientation::Portrait);
    assert_eq!(cfg.tilt.scale, 40.0);
    assert_eq!(cfg.rules.start_lives, 3);
    assert_eq!(cfg.rules.finish_points, 10);
}

#[test]
fn missing_and_broken_layers_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let broken = dir.path().join("broken.ron");
    let missing = dir.path().join("missing.ron");
    fs::write(&base, "(rules: (star_points: 2))").expect("write base");
    fs::write(&broken, "(rules: (").expect("write broken");

    let (cfg, used, errors) = GameConfig::load_layered([&base, &broken, &missing]);
    assert_eq!(used.len(), 1);
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert_eq!(cfg.rules.star_points, 2);
}

#[test]
fn no_layers_means_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (cfg, used, errors) = GameConfig::load_layered([dir.path().join("nope.ron")]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn input_map_asset_parses_cleanly() {
    let raw = fs::read_to_string("assets/config/input.toml").expect("input.toml");
    let parsed = tilt_ball::interaction::inputmap::parse::parse_input_toml(&raw, true);
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    for action in ["Restart", "Quit", "ToggleWireframe", "ToggleOverlay"] {
        assert!(parsed.input_map.name_to_id.contains_key(action), "missing {action}");
    }
}
