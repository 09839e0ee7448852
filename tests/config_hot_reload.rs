use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use tilt_ball::core::config::{CliOverrides, TiltSource};
use tilt_ball::interaction::session::config_hot_reload::{ConfigHotReloadPlugin, ConfigReloadSettings};
use tilt_ball::GameConfig;

/// Rewrite a layer and push its mtime forward so the poller always sees it.
fn rewrite(path: &Path, contents: &str, ahead_secs: u64) {
    fs::write(path, contents).expect("write layer");
    let file = fs::File::options().write(true).open(path).expect("open layer");
    file.set_modified(SystemTime::now() + Duration::from_secs(ahead_secs))
        .expect("set mtime");
}

fn reload_app(paths: Vec<PathBuf>, overrides: CliOverrides) -> App {
    let (mut cfg, _used, errors) = GameConfig::load_layered(&paths);
    assert!(errors.is_empty(), "{errors:?}");
    overrides.apply(&mut cfg);
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(cfg)
        .insert_resource(overrides)
        .insert_resource(ConfigReloadSettings {
            paths,
            interval_secs: 0.05,
        })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(ConfigHotReloadPlugin);
    app.update();
    app
}

fn cfg(app: &App) -> GameConfig {
    app.world().resource::<GameConfig>().clone()
}

#[test]
fn edits_apply_live_and_keep_cli_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    fs::write(&base, "(rules: (start_lives: 3))").expect("write base");
    let overrides = CliOverrides {
        tilt_source: Some(TiltSource::Pointer),
        auto_close: None,
    };
    let mut app = reload_app(vec![base.clone()], overrides);
    assert_eq!(cfg(&app).tilt.source, TiltSource::Pointer);

    rewrite(&base, r#"(rules: (start_lives: 4), tilt: (source: "Accelerometer"))"#, 10);
    app.update();
    app.update();
    let after = cfg(&app);
    assert_eq!(after.rules.start_lives, 4);
    assert_eq!(after.tilt.source, TiltSource::Pointer, "pointer mode lost on reload");
}

#[test]
fn broken_edit_keeps_running_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    fs::write(&base, "(rules: (start_lives: 3), tilt: (scale: 20.0))").expect("write base");
    let mut app = reload_app(vec![base.clone(), local], CliOverrides::default());
    assert_eq!(cfg(&app).rules.start_lives, 3);

    // Missing closing paren.
    rewrite(&base, "(rules: (start_lives: 3), tilt: (scale: 20.0)", 10);
    app.update();
    app.update();
    let after = cfg(&app);
    assert_eq!(after.rules.start_lives, 3);
    assert_eq!(after.tilt.scale, 20.0);

    // Fixing the file applies again.
    rewrite(&base, "(rules: (start_lives: 2), tilt: (scale: 20.0))", 20);
    app.update();
    app.update();
    assert_eq!(cfg(&app).rules.start_lives, 2);
}

#[test]
fn pixels_per_meter_needs_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    fs::write(&base, "(physics: (pixels_per_meter: 150.0))").expect("write base");
    let mut app = reload_app(vec![base.clone()], CliOverrides::default());

    rewrite(&base, "(physics: (pixels_per_meter: 300.0), rules: (star_points: 2))", 10);
    app.update();
    app.update();
    let after = cfg(&app);
    assert_eq!(after.rules.star_points, 2);
    assert_eq!(after.physics.pixels_per_meter, 150.0);
}
