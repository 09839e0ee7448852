//! Player/marker contact resolution.
use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{MarkerKind, Player};
use crate::core::config::GameConfig;
use crate::gameplay::respawn::{freeze_player, RespawnReason, RespawnSequence};
use crate::gameplay::state::{ContactOutcome, ContactResolved, Scoreboard};

/// Pick out `(player, marker, kind)` from a started contact pair. Pairs that do
/// not involve exactly one player and one marker (walls, marker/marker) yield
/// `None`.
pub fn classify_contact(
    a: Entity,
    b: Entity,
    is_player: impl Fn(Entity) -> bool,
    marker_kind: impl Fn(Entity) -> Option<MarkerKind>,
) -> Option<(Entity, Entity, MarkerKind)> {
    match (is_player(a), is_player(b)) {
        (true, false) => marker_kind(b).map(|k| (a, b, k)),
        (false, true) => marker_kind(a).map(|k| (b, a, k)),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_player_contacts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    cfg: Res<GameConfig>,
    mut scoreboard: ResMut<Scoreboard>,
    mut next_state: ResMut<NextState<AppState>>,
    q_players: Query<(&Transform, Has<RespawnSequence>), With<Player>>,
    q_markers: Query<(&MarkerKind, &Transform)>,
    mut resolved: EventWriter<ContactResolved>,
) {
    // Commands apply at the end of the frame; track what this frame already touched.
    let mut frozen: HashSet<Entity> = HashSet::new();
    let mut consumed: HashSet<Entity> = HashSet::new();

    for ev in collisions.read() {
        let CollisionEvent::Started(e1, e2, _flags) = ev else {
            continue;
        };
        let Some((player, marker, kind)) = classify_contact(
            *e1,
            *e2,
            |e| q_players.contains(e),
            |e| q_markers.get(e).ok().map(|(k, _)| *k),
        ) else {
            continue;
        };
        let Ok((player_tf, respawning)) = q_players.get(player) else {
            continue;
        };
        if respawning || frozen.contains(&player) || consumed.contains(&marker) {
            debug!(target: "contacts", "ignoring {} contact on inactive player {:?}", kind.label(), player);
            continue;
        }
        let Ok((_, marker_tf)) = q_markers.get(marker) else {
            continue;
        };
        let marker_pos = marker_tf.translation.truncate();
        let outcome = scoreboard.apply(kind, marker_pos, &cfg.rules);
        match outcome {
            ContactOutcome::Collected { points } => {
                consumed.insert(marker);
                commands.entity(marker).despawn();
                info!(target: "contacts", "star collected +{points} score={}", scoreboard.score);
            }
            ContactOutcome::LifeLost {
                remaining,
                respawn_toward,
            } => {
                frozen.insert(player);
                freeze_player(&mut commands, player);
                commands.entity(player).insert(RespawnSequence::new(
                    player_tf.translation.truncate(),
                    respawn_toward,
                    RespawnReason::LifeLost,
                    &cfg.respawn,
                ));
                info!(target: "contacts", "skull hit lives={remaining}");
            }
            ContactOutcome::LevelComplete {
                points,
                respawn_toward,
            } => {
                frozen.insert(player);
                freeze_player(&mut commands, player);
                commands.entity(player).insert(RespawnSequence::new(
                    player_tf.translation.truncate(),
                    respawn_toward,
                    RespawnReason::LevelAdvance,
                    &cfg.respawn,
                ));
                info!(target: "contacts", "finish reached +{points} score={}", scoreboard.score);
            }
            ContactOutcome::GameOver => {
                frozen.insert(player);
                freeze_player(&mut commands, player);
                next_state.set(AppState::GameOver);
                info!(target: "contacts", "skull hit on last life: game over score={}", scoreboard.score);
            }
            ContactOutcome::Ignored => continue,
        }
        resolved.write(ContactResolved { kind, outcome });
    }
}
