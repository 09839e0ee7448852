#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::gameplay::state::Scoreboard;

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    scoreboard: Option<Res<Scoreboard>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let (score, lives) = scoreboard.map(|s| (s.score, s.lives)).unwrap_or_default();
    info!(
        "SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} gravity=({:.2},{:.2}) score={} lives={} stars={} skulls={} players={} respawning={}",
        state.frame_counter,
        time.elapsed_secs(),
        stats.fps,
        stats.frame_time_ms,
        stats.gravity.x,
        stats.gravity.y,
        score,
        lives,
        stats.stars,
        stats.skulls,
        stats.players,
        stats.respawning
    );
}
