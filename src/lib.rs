pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::{CoreGamePlugin, GamePlugin};
pub use app::state::AppState;
pub use core::components::{BallRadius, MarkerKind, Player};
pub use core::config::{GameConfig, WindowConfig};
