#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{MarkerKind, Player};
#[cfg(feature = "debug")]
use crate::gameplay::respawn::RespawnSequence;
#[cfg(feature = "debug")]
use crate::interaction::tilt::TiltGravity;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_markers: Query<&MarkerKind>,
    q_players: Query<Has<RespawnSequence>, With<Player>>,
    gravity: Option<Res<TiltGravity>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    stats.fps = if stats.fps == 0.0 { inst_fps } else { stats.fps * 0.9 + inst_fps * 0.1 };
    let inst_ms = dt * 1000.0;
    stats.frame_time_ms = if stats.frame_time_ms == 0.0 {
        inst_ms
    } else {
        stats.frame_time_ms * 0.9 + inst_ms * 0.1
    };
    stats.stars = q_markers.iter().filter(|k| **k == MarkerKind::Star).count();
    stats.skulls = q_markers.iter().filter(|k| **k == MarkerKind::Skull).count();
    stats.players = q_players.iter().count();
    stats.respawning = q_players.iter().filter(|r| *r).count();
    stats.gravity = gravity.map(|g| g.0).unwrap_or(Vec2::ZERO);
}
