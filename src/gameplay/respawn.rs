//! Move / shrink / remove sequence a frozen player runs before a new one
//! is spawned.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::Player;
use crate::core::config::{GameConfig, RespawnConfig};
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::spawn::spawn::{spawn_player, spawn_skull, spawn_star, GameRng};
use crate::rendering::materials::materials::MarkerVisuals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnReason {
    LifeLost,
    LevelAdvance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequencePhase {
    Move,
    Shrink,
    Done,
}

/// Per-frame pose produced by [`RespawnSequence::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceFrame {
    pub position: Vec2,
    pub scale: f32,
    pub finished: bool,
}

#[derive(Component, Debug, Clone)]
pub struct RespawnSequence {
    pub from: Vec2,
    pub to: Vec2,
    pub move_duration: f32,
    pub shrink_duration: f32,
    pub min_scale: f32,
    pub elapsed: f32,
    pub reason: RespawnReason,
}

impl RespawnSequence {
    pub fn new(from: Vec2, to: Vec2, reason: RespawnReason, cfg: &RespawnConfig) -> Self {
        Self {
            from,
            to,
            move_duration: cfg.move_duration.max(0.0),
            shrink_duration: cfg.shrink_duration.max(0.0),
            min_scale: cfg.min_scale.clamp(0.0, 1.0),
            elapsed: 0.0,
            reason,
        }
    }

    #[inline]
    pub fn total(&self) -> f32 {
        self.move_duration + self.shrink_duration
    }

    fn phase(&self) -> SequencePhase {
        if self.elapsed < self.move_duration {
            SequencePhase::Move
        } else if self.elapsed < self.total() {
            SequencePhase::Shrink
        } else {
            SequencePhase::Done
        }
    }

    pub fn advance(&mut self, dt: f32) -> SequenceFrame {
        self.elapsed += dt.max(0.0);
        match self.phase() {
            SequencePhase::Move => {
                let t = self.elapsed / self.move_duration;
                SequenceFrame {
                    position: self.from.lerp(self.to, t),
                    scale: 1.0,
                    finished: false,
                }
            }
            SequencePhase::Shrink => {
                let t = (self.elapsed - self.move_duration) / self.shrink_duration;
                SequenceFrame {
                    position: self.to,
                    scale: 1.0 + (self.min_scale - 1.0) * t,
                    finished: false,
                }
            }
            SequencePhase::Done => SequenceFrame {
                position: self.to,
                scale: self.min_scale,
                finished: true,
            },
        }
    }
}

/// Emitted after a sequence completes and the old player has been removed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnFinished {
    pub reason: RespawnReason,
}

pub struct RespawnPlugin;

impl Plugin for RespawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RespawnFinished>().add_systems(
            Update,
            (run_respawn_sequences, spawn_after_sequence)
                .chain()
                .in_set(PostPhysicsAdjustSet),
        );
    }
}

/// Stop the player where it is: kinematic, no velocity and no collider, so it
/// can neither move under gravity nor raise further contacts.
pub fn freeze_player(commands: &mut Commands, player: Entity) {
    commands
        .entity(player)
        .insert((RigidBody::KinematicPositionBased, Velocity::zero()))
        .remove::<Collider>();
}

fn run_respawn_sequences(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Transform, &mut RespawnSequence), With<Player>>,
    mut ew: EventWriter<RespawnFinished>,
) {
    let dt = time.delta_secs();
    for (entity, mut tf, mut seq) in q.iter_mut() {
        let frame = seq.advance(dt);
        tf.translation.x = frame.position.x;
        tf.translation.y = frame.position.y;
        tf.scale = Vec3::splat(frame.scale);
        if frame.finished {
            commands.entity(entity).despawn();
            debug!(target: "respawn", "sequence finished reason={:?}", seq.reason);
            ew.write(RespawnFinished { reason: seq.reason });
        }
    }
}

fn spawn_after_sequence(
    mut commands: Commands,
    mut er: EventReader<RespawnFinished>,
    cfg: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    visuals: Option<Res<MarkerVisuals>>,
) {
    let visuals = visuals.as_deref();
    for ev in er.read() {
        if ev.reason == RespawnReason::LevelAdvance {
            spawn_skull(&mut commands, &mut rng, &cfg, visuals);
            spawn_star(&mut commands, &mut rng, &cfg, visuals);
            info!(target: "respawn", "level advanced: new star and skull placed");
        }
        spawn_player(&mut commands, &cfg, visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq() -> RespawnSequence {
        RespawnSequence::new(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            RespawnReason::LifeLost,
            &RespawnConfig::default(),
        )
    }

    #[test]
    fn moves_then_shrinks_then_finishes() {
        let mut s = seq();
        let f = s.advance(0.125);
        assert!((f.position.x - 50.0).abs() < 1e-3);
        assert_eq!(f.scale, 1.0);
        assert!(!f.finished);

        let f = s.advance(0.25);
        assert_eq!(f.position, Vec2::new(100.0, 0.0));
        assert!(f.scale < 0.6 && f.scale > 0.4, "half way through shrink: {}", f.scale);
        assert!(!f.finished);

        let f = s.advance(0.2);
        assert!(f.finished);
        assert!((f.scale - 0.0001).abs() < 1e-6);
    }

    #[test]
    fn zero_durations_finish_immediately() {
        let cfg = RespawnConfig {
            move_duration: 0.0,
            shrink_duration: 0.0,
            min_scale: 0.0001,
        };
        let mut s = RespawnSequence::new(Vec2::ZERO, Vec2::ONE, RespawnReason::LevelAdvance, &cfg);
        let f = s.advance(0.0);
        assert!(f.finished);
        assert_eq!(f.position, Vec2::ONE);
    }

    #[test]
    fn total_is_half_a_second_by_default() {
        assert!((seq().total() - 0.5).abs() < 1e-6);
    }
}
