use bevy::prelude::*;

/// High-level session state.
/// Playing -> GameOver -> (restart) -> Playing
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Ball is live; tilt input and contacts are processed.
    #[default]
    Playing,
    /// Lives exhausted; only the restart action is handled.
    GameOver,
}
