use bevy::prelude::*;
use std::{collections::HashMap, path::{Path, PathBuf}, time::SystemTime};

use crate::core::config::{CliOverrides, GameConfig};

/// Layers polled for changes; `main` overwrites this with the CLI layers.
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}

impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}

impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<ConfigReloadSettings>()
            .map(|s| s.interval_secs)
            .unwrap_or(0.5);
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(interval.max(0.05), TimerMode::Repeating),
        }
    }
}

pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if !app.world().contains_resource::<ConfigReloadSettings>() {
                app.init_resource::<ConfigReloadSettings>();
            }
            app.init_resource::<ConfigReloadState>()
                .add_systems(Startup, seed_modification_times)
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Files already loaded at startup are not reloaded on the first poll.
fn seed_modification_times(settings: Res<ConfigReloadSettings>, mut state: ResMut<ConfigReloadState>) {
    for path in &settings.paths {
        if let Some(t) = modified(path) {
            state.last_mod.insert(path.clone(), t);
        }
    }
}

/// Reloaded config as it should be installed: CLI overrides re-applied and
/// settings fixed at startup carried over. `None` when nothing changes.
pub fn prepare_reload(
    current: &GameConfig,
    mut loaded: GameConfig,
    overrides: Option<&CliOverrides>,
) -> Option<GameConfig> {
    if let Some(o) = overrides {
        o.apply(&mut loaded);
    }
    // Rapier's length unit is fixed when its plugin is built.
    if loaded.physics.pixels_per_meter != current.physics.pixels_per_meter {
        warn!(
            target: "config",
            "physics.pixels_per_meter change ({} -> {}) needs a restart; keeping {}",
            current.physics.pixels_per_meter,
            loaded.physics.pixels_per_meter,
            current.physics.pixels_per_meter
        );
        loaded.physics.pixels_per_meter = current.physics.pixels_per_meter;
    }
    (*current != loaded).then_some(loaded)
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    overrides: Option<Res<CliOverrides>>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut windows: Query<&mut Window>,
) {
    if !state.timer.tick(time.delta()).just_finished() {
        return;
    }
    let mut dirty = false;
    for path in &settings.paths {
        let Some(mod_time) = modified(path) else {
            continue;
        };
        let entry = state.last_mod.entry(path.clone()).or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    if !dirty {
        return;
    }
    let loaded = match GameConfig::reload_layered(settings.paths.iter()) {
        Ok(cfg) => cfg,
        Err(errors) => {
            for e in errors {
                warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
            }
            warn!(target: "config", "config hot-reload skipped; keeping the running config");
            return;
        }
    };
    let Some(new_cfg) = prepare_reload(&cfg_res, loaded, overrides.as_deref()) else {
        return;
    };
    for w in new_cfg.validate() {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window.resolution.set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    *cfg_res = new_cfg;
    info!(target: "config", "config hot-reload applied");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_survive_and_scale_is_kept() {
        let current = GameConfig::default();
        let mut loaded = GameConfig::default();
        loaded.rules.start_lives = 4;
        loaded.physics.pixels_per_meter = 300.0;
        let overrides = CliOverrides {
            tilt_source: Some(crate::core::config::TiltSource::Pointer),
            auto_close: None,
        };
        let next = prepare_reload(&current, loaded, Some(&overrides)).expect("changed");
        assert_eq!(next.rules.start_lives, 4);
        assert_eq!(next.tilt.source, crate::core::config::TiltSource::Pointer);
        assert_eq!(next.physics.pixels_per_meter, current.physics.pixels_per_meter);
    }

    #[test]
    fn unchanged_after_overrides_is_a_no_op() {
        let mut current = GameConfig::default();
        current.tilt.source = crate::core::config::TiltSource::Pointer;
        let overrides = CliOverrides {
            tilt_source: Some(crate::core::config::TiltSource::Pointer),
            auto_close: None,
        };
        assert!(prepare_reload(&current, GameConfig::default(), Some(&overrides)).is_none());
    }
}
