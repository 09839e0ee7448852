use std::path::PathBuf;

use anyhow::{bail, Result};
use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierDebugRenderPlugin;
use clap::Parser;

use tilt_ball::core::config::{CliOverrides, TiltSource};
use tilt_ball::gameplay::RngSeed;
use tilt_ball::interaction::session::config_hot_reload::ConfigReloadSettings;
use tilt_ball::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(name = "tilt_ball", version, about = "Tilt-controlled ball arcade game")]
struct Cli {
    /// RON config layer; repeat to stack (later wins). Replaces the default layers.
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Fixed RNG seed for star / skull placement
    #[arg(long)]
    seed: Option<u64>,
    /// Steer toward the pointer / touch instead of the accelerometer
    #[arg(long)]
    pointer: bool,
    /// Exit after this many seconds (0 = never)
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
}

/// Load-time messages, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
struct ConfigReport {
    used: Vec<String>,
    issues: Vec<String>,
    warnings: Vec<String>,
}

#[cfg(target_arch = "wasm32")]
fn load_config(_cli: &Cli) -> Result<(GameConfig, ConfigReport)> {
    // Embed base config (no layered local override on wasm).
    const RAW: &str = include_str!("../assets/config/game.ron");
    let mut report = ConfigReport::default();
    let cfg = GameConfig::from_ron_str(RAW).unwrap_or_else(|e| {
        report.issues.push(format!("embedded config: {e}; using defaults"));
        GameConfig::default()
    });
    report.used.push("<embedded game.ron>".into());
    Ok((cfg, report))
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(cli: &Cli) -> Result<(GameConfig, ConfigReport)> {
    let explicit = !cli.config.is_empty();
    let (cfg, used, errors) = GameConfig::load_layered(layer_paths(cli));
    if explicit && used.is_empty() {
        bail!("none of the config layers could be read: {}", errors.join("; "));
    }
    // The local override layer is optional.
    let issues = errors
        .into_iter()
        .filter(|e| explicit || !(e.contains("game.local.ron") && e.contains("read error")))
        .collect();
    Ok((
        cfg,
        ConfigReport {
            used,
            issues,
            warnings: Vec::new(),
        },
    ))
}

fn layer_paths(cli: &Cli) -> Vec<PathBuf> {
    if cli.config.is_empty() {
        vec![
            PathBuf::from("assets/config/game.ron"),
            PathBuf::from("assets/config/game.local.ron"),
        ]
    } else {
        cli.config.clone()
    }
}

fn log_config_report(report: Res<ConfigReport>, cfg: Res<GameConfig>) {
    for e in &report.issues {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    if report.used.is_empty() {
        info!(target: "config", "No config layers found; using defaults");
    } else {
        info!(target: "config", used = ?report.used, "Config layers loaded");
    }
    for w in &report.warnings {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
    info!(
        target: "config",
        source = ?cfg.tilt.source,
        orientation = ?cfg.tilt.orientation,
        lives = cfg.rules.start_lives,
        "Runtime summary"
    );
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        // Better panic messages on wasm
        console_error_panic_hook::set_once();
    }

    let cli = Cli::parse();
    let (mut cfg, mut report) = load_config(&cli)?;
    let overrides = CliOverrides {
        tilt_source: cli.pointer.then_some(TiltSource::Pointer),
        auto_close: cli.auto_close,
    };
    overrides.apply(&mut cfg);
    report.warnings = cfg.validate();

    let window_title = cfg.window.title.clone();
    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(report)
        .insert_resource(overrides)
        .insert_resource(ConfigReloadSettings {
            paths: layer_paths(&cli),
            ..Default::default()
        });
    if let Some(seed) = cli.seed {
        app.insert_resource(RngSeed(seed));
    }
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .add_plugins(GamePlugin)
    .add_systems(Startup, log_config_report);

    // Debug builds always carry the wireframe renderer; F1 toggles it.
    #[cfg(feature = "debug")]
    {
        app.add_plugins(RapierDebugRenderPlugin::default());
    }
    #[cfg(not(feature = "debug"))]
    {
        if cfg.rapier_debug {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("app exited with error code {code}"),
    }
}
