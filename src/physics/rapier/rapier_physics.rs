use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::interaction::tilt::TiltGravity;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier & tilt gravity

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        // Fixed for the session; config hot reload keeps this value.
        let pixels_per_meter = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.physics.pixels_per_meter)
            .unwrap_or_else(|| GameConfig::default().physics.pixels_per_meter);
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(pixels_per_meter))
            .add_systems(PostStartup, configure_gravity)
            .add_systems(Update, apply_tilt_gravity.in_set(PrePhysicsSet));
    }
}

/// World gravity starts at rest; the ball only moves once the device tilts.
fn configure_gravity(mut rapier_cfg: Query<&mut RapierConfiguration>) {
    for mut cfg in rapier_cfg.iter_mut() {
        cfg.gravity = Vect::ZERO;
    }
}

/// Tilt gravity is expressed in m/s^2; rapier's context works in pixels.
pub fn gravity_in_pixels(gravity: Vec2, pixels_per_meter: f32) -> Vect {
    gravity * pixels_per_meter
}

pub fn apply_tilt_gravity(
    tilt: Res<TiltGravity>,
    cfg: Res<GameConfig>,
    mut rapier_cfg: Query<&mut RapierConfiguration>,
) {
    if !tilt.is_changed() && !cfg.is_changed() {
        return;
    }
    let target = gravity_in_pixels(tilt.0, cfg.physics.pixels_per_meter);
    for mut rc in rapier_cfg.iter_mut() {
        if rc.gravity != target {
            rc.gravity = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_scales_by_pixels_per_meter() {
        assert_eq!(gravity_in_pixels(Vec2::new(1.0, -2.0), 150.0), Vec2::new(150.0, -300.0));
    }

    #[test]
    fn tilt_gravity_written_into_rapier_context() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(TiltGravity(Vec2::new(2.0, 0.0)));
        let ctx = app.world_mut().spawn(RapierConfiguration::new(1.0)).id();
        app.add_systems(Update, apply_tilt_gravity);
        app.update();
        let rc = app.world().get::<RapierConfiguration>(ctx).expect("rapier configuration");
        assert_eq!(rc.gravity, Vec2::new(300.0, 0.0));
    }
}
