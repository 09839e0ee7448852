pub mod config;

pub use config::{
    ArenaConfig, CliOverrides, DeviceOrientation, GameConfig, HudConfig, MarkerConfig, PhysicsConfig,
    PlayerConfig, PointConfig, RespawnConfig, RulesConfig, SpawnRange, TiltConfig, TiltSource,
    WindowConfig,
};
