//! Touch-steer: gravity pulls the ball toward the active touch (or held mouse).
use bevy::prelude::*;

use crate::core::components::Player;
use crate::core::config::{GameConfig, TiltSource};
use crate::gameplay::respawn::RespawnSequence;

use super::motion::TiltGravity;

/// World position of the current touch; `None` once it ends or is cancelled.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LastTouch(pub Option<Vec2>);

pub fn pointer_gravity(touch: Vec2, player: Vec2, divisor: f32) -> Vec2 {
    (touch - player) / divisor.max(f32::EPSILON)
}

fn cursor_world_pos(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

pub fn track_touch(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut last_touch: ResMut<LastTouch>,
) {
    // Began / moved: follow the first active touch.
    if let Some(touch) = touches.iter().next() {
        last_touch.0 = cursor_world_pos(&camera_q, touch.position()).or(last_touch.0);
        return;
    }
    if buttons.pressed(MouseButton::Left) {
        let Ok(window) = windows_q.single() else {
            return;
        };
        if let Some(cursor) = window.cursor_position() {
            last_touch.0 = cursor_world_pos(&camera_q, cursor).or(last_touch.0);
        }
        return;
    }
    // Ended / cancelled.
    if last_touch.0.is_some() {
        last_touch.0 = None;
    }
}

/// Runs every frame while a touch is held; gravity keeps its last value otherwise.
pub fn steer_toward_touch(
    cfg: Res<GameConfig>,
    last_touch: Res<LastTouch>,
    q_player: Query<&Transform, (With<Player>, Without<RespawnSequence>)>,
    mut gravity: ResMut<TiltGravity>,
) {
    if cfg.tilt.source != TiltSource::Pointer {
        return;
    }
    let Some(touch) = last_touch.0 else {
        return;
    };
    let Some(player_tf) = q_player.iter().next() else {
        return;
    };
    gravity.0 = pointer_gravity(touch, player_tf.translation.truncate(), cfg.tilt.pointer_divisor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_points_from_player_to_touch() {
        let g = pointer_gravity(Vec2::new(100.0, 50.0), Vec2::new(-100.0, 50.0), 100.0);
        assert_eq!(g, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn zero_divisor_does_not_produce_nan() {
        let g = pointer_gravity(Vec2::ONE, Vec2::ZERO, 0.0);
        assert!(g.is_finite());
    }
}
