use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Tilt Ball".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PointConfig {
    pub x: f32,
    pub y: f32,
}
impl Default for PointConfig {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}
impl PointConfig {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

/// Playfield extents. `width`/`height` are what the camera fits to; the
/// spawn ranges bound where stars and skulls may appear.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub spawn_x: SpawnRange<f32>,
    pub spawn_y: SpawnRange<f32>,
    pub walls: bool,
    pub wall_thickness: f32,
}
impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            spawn_x: SpawnRange {
                min: -850.0,
                max: 850.0,
            },
            spawn_y: SpawnRange {
                min: -400.0,
                max: 400.0,
            },
            walls: true,
            wall_thickness: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub pixels_per_meter: f32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 150.0,
        }
    }
}

/// Where the gravity vector comes from.
///
/// Written as a string in RON (`source: "Pointer"`) so it survives the
/// untyped `Value` merge in [`GameConfig::load_layered`].
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum TiltSource {
    /// Raw accelerometer samples (emulated from the keyboard on desktop).
    #[default]
    Accelerometer,
    /// Touch-steer: gravity points from the player toward the active touch.
    Pointer,
}

impl TryFrom<String> for TiltSource {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Accelerometer" => Ok(Self::Accelerometer),
            "Pointer" => Ok(Self::Pointer),
            other => Err(format!(
                "unknown tilt source '{other}': expected Accelerometer|Pointer"
            )),
        }
    }
}

/// Maps raw device axes onto screen axes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum DeviceOrientation {
    Portrait,
    #[default]
    LandscapeRight,
}
impl TryFrom<String> for DeviceOrientation {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Portrait" => Ok(Self::Portrait),
            "LandscapeRight" => Ok(Self::LandscapeRight),
            other => Err(format!(
                "unknown orientation '{other}': expected Portrait|LandscapeRight"
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TiltConfig {
    pub source: TiltSource,
    pub orientation: DeviceOrientation,
    /// Multiplier from accelerometer g-units to m/s^2.
    pub scale: f32,
    /// Seconds between motion samples.
    pub update_interval: f32,
    pub pointer_divisor: f32,
}
impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            source: TiltSource::Accelerometer,
            orientation: DeviceOrientation::LandscapeRight,
            scale: 50.0,
            update_interval: 0.1,
            pointer_divisor: 100.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: PointConfig,
    pub radius: f32,
    pub linear_damping: f32,
    pub restitution: f32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: PointConfig::new(-867.94, 322.929),
            radius: 28.0,
            linear_damping: 0.5,
            restitution: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MarkerConfig {
    pub star_radius: f32,
    pub skull_radius: f32,
    pub finish_radius: f32,
    pub finish_position: PointConfig,
}
impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            star_radius: 24.0,
            skull_radius: 24.0,
            finish_radius: 36.0,
            finish_position: PointConfig::new(862.689, -431.179),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub start_lives: u32,
    pub star_points: u32,
    pub finish_points: u32,
}
impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            start_lives: 5,
            star_points: 1,
            finish_points: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RespawnConfig {
    pub move_duration: f32,
    pub shrink_duration: f32,
    pub min_scale: f32,
}
impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            move_duration: 0.25,
            shrink_duration: 0.25,
            min_scale: 0.0001,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HudConfig {
    pub font_size: f32,
    pub margin: f32,
}
impl Default for HudConfig {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            margin: 16.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub arena: ArenaConfig,
    pub physics: PhysicsConfig,
    pub tilt: TiltConfig,
    pub player: PlayerConfig,
    pub markers: MarkerConfig,
    pub rules: RulesConfig,
    pub respawn: RespawnConfig,
    pub hud: HudConfig,
    pub rapier_debug: bool,
}

/// Why a config layer did not contribute to the merged config.
#[derive(Debug, Clone, PartialEq)]
enum LayerIssue {
    Unreadable { path: String, message: String },
    Parse { path: String, message: String },
    Deserialize(String),
}

impl std::fmt::Display for LayerIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerIssue::Unreadable { path, message } => write!(f, "{path}: read error: {message}"),
            LayerIssue::Parse { path, message } => write!(f, "{path}: parse error: {message}"),
            LayerIssue::Deserialize(message) => {
                write!(f, "failed to deserialize merged config; using defaults: {message}")
            }
        }
    }
}

/// Command-line settings that outrank every config layer, including layers
/// picked up by the live reloader.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub tilt_source: Option<TiltSource>,
    pub auto_close: Option<f32>,
}

impl CliOverrides {
    pub fn apply(&self, cfg: &mut GameConfig) {
        if let Some(source) = self.tilt_source {
            cfg.tilt.source = source;
        }
        if let Some(secs) = self.auto_close {
            cfg.window.auto_close = secs.max(0.0);
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Deep-merge every readable RON layer in order (later layers win) and
    /// deserialize the result. Returns the config, the layers actually used and
    /// any per-layer errors. Unreadable layers are skipped, never fatal.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let (cfg, used, issues) = Self::load_layers(paths);
        (cfg, used, issues.iter().map(ToString::to_string).collect())
    }

    /// Stricter variant for live reloads: a layer that exists but does not
    /// parse, or a merge that does not deserialize, rejects the whole reload.
    /// Missing layers are still skipped.
    pub fn reload_layered<P, I>(paths: I) -> Result<Self, Vec<String>>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let (cfg, _used, issues) = Self::load_layers(paths);
        let invalid: Vec<String> = issues
            .iter()
            .filter(|i| !matches!(i, LayerIssue::Unreadable { .. }))
            .map(ToString::to_string)
            .collect();
        if invalid.is_empty() {
            Ok(cfg)
        } else {
            Err(invalid)
        }
    }

    fn load_layers<P, I>(paths: I) -> (Self, Vec<String>, Vec<LayerIssue>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut issues = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        if let Some(ev) = existing {
                            merge_value(ev, v);
                            continue;
                        }
                        bm.insert(k, v);
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            let path = path_ref.display().to_string();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => issues.push(LayerIssue::Parse { path, message: e.to_string() }),
                },
                Err(e) => issues.push(LayerIssue::Unreadable { path, message: e.to_string() }),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, issues);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, issues),
            Err(e) => {
                issues.push(LayerIssue::Deserialize(e.to_string()));
                (GameConfig::default(), used, issues)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            w.push("arena dimensions must be > 0".into());
        }
        fn check_range_f32(w: &mut Vec<String>, label: &str, r: &SpawnRange<f32>) {
            if r.min > r.max {
                w.push(format!(
                    "{label} min ({}) greater than max ({})",
                    r.min, r.max
                ));
            }
            if (r.max - r.min).abs() < f32::EPSILON {
                w.push(format!("{label} min == max ({}) -> zero variation", r.min));
            }
        }
        check_range_f32(&mut w, "arena.spawn_x", &self.arena.spawn_x);
        check_range_f32(&mut w, "arena.spawn_y", &self.arena.spawn_y);
        let half = Vec2::new(self.arena.width, self.arena.height) * 0.5;
        if self.arena.spawn_x.max > half.x || self.arena.spawn_x.min < -half.x {
            w.push("arena.spawn_x extends past the arena; markers may spawn off screen".into());
        }
        if self.arena.spawn_y.max > half.y || self.arena.spawn_y.min < -half.y {
            w.push("arena.spawn_y extends past the arena; markers may spawn off screen".into());
        }
        if self.arena.walls && self.arena.wall_thickness <= 0.0 {
            w.push("arena.wall_thickness must be > 0 when walls are enabled".into());
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.tilt.scale.abs() < 1e-4 {
            w.push("tilt.scale near zero; tilting will not move the ball".into());
        }
        if self.tilt.update_interval <= 0.0 {
            w.push(format!(
                "tilt.update_interval {} must be > 0 (sampling every frame instead)",
                self.tilt.update_interval
            ));
        } else if self.tilt.update_interval > 1.0 {
            w.push(format!(
                "tilt.update_interval {} very long; controls will feel laggy",
                self.tilt.update_interval
            ));
        }
        if self.tilt.pointer_divisor <= 0.0 {
            w.push("tilt.pointer_divisor must be > 0".into());
        }
        if self.player.radius <= 0.0 {
            w.push("player.radius must be > 0".into());
        }
        if !(0.0..=10.0).contains(&self.player.linear_damping) {
            w.push(format!(
                "player.linear_damping {} outside 0..10",
                self.player.linear_damping
            ));
        }
        if !(0.0..=1.5).contains(&self.player.restitution) {
            w.push(format!(
                "player.restitution {} outside recommended 0..1.5",
                self.player.restitution
            ));
        }
        for (label, r) in [
            ("markers.star_radius", self.markers.star_radius),
            ("markers.skull_radius", self.markers.skull_radius),
            ("markers.finish_radius", self.markers.finish_radius),
        ] {
            if r <= 0.0 {
                w.push(format!("{label} must be > 0"));
            }
        }
        let start = self.player.start.as_vec2();
        let finish = self.markers.finish_position.as_vec2();
        if start.distance(finish) < self.player.radius + self.markers.finish_radius {
            w.push("player.start overlaps the finish; every spawn completes the level".into());
        }
        if self.rules.start_lives == 0 {
            w.push("rules.start_lives is 0; the game starts already over".into());
        }
        if self.respawn.move_duration < 0.0 || self.respawn.shrink_duration < 0.0 {
            w.push("respawn durations must be >= 0".into());
        }
        if !(0.0..1.0).contains(&self.respawn.min_scale) {
            w.push(format!(
                "respawn.min_scale {} should be in 0..1",
                self.respawn.min_scale
            ));
        }
        w
    }
}
