//! Accelerometer sampling and the device-axis to screen-axis mapping.
use bevy::prelude::*;

use crate::core::config::{DeviceOrientation, GameConfig, TiltSource};
use crate::interaction::inputmap::types::InputMap;

impl DeviceOrientation {
    /// Gravity (m/s^2) for a raw accelerometer reading (g-units, device axes).
    ///
    /// Portrait keeps the device axes with y flipped; landscape swaps x/y so
    /// tilting the long edge rolls the ball horizontally.
    pub fn gravity_from(self, accel: Vec2, scale: f32) -> Vec2 {
        match self {
            DeviceOrientation::Portrait => Vec2::new(accel.x * scale, -accel.y * scale),
            DeviceOrientation::LandscapeRight => Vec2::new(-accel.y * scale, accel.x * scale),
        }
    }

    /// Raw device axes that produce gravity along `tilt` (screen space, unit
    /// scale). Inverse of [`DeviceOrientation::gravity_from`] with `scale == 1`.
    pub fn accel_for_tilt(self, tilt: Vec2) -> Vec2 {
        match self {
            DeviceOrientation::Portrait => Vec2::new(tilt.x, -tilt.y),
            DeviceOrientation::LandscapeRight => Vec2::new(tilt.y, -tilt.x),
        }
    }
}

/// Latest raw accelerometer reading (device axes, g-units).
///
/// A platform bridge writes this directly; on desktop the keyboard emulator
/// fills it from the `TiltX` / `TiltY` virtual axes.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub acceleration: Option<Vec2>,
}

impl MotionSample {
    pub fn push(&mut self, acceleration: Vec2) {
        self.acceleration = Some(acceleration);
    }
}

/// Whether the keyboard drives [`MotionSample`]. Disable when a real sensor
/// feeds samples.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MotionEmulation {
    pub enabled: bool,
}
impl Default for MotionEmulation {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Target world gravity in m/s^2, consumed by the physics layer.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct TiltGravity(pub Vec2);

/// Sensor cadence timer.
#[derive(Resource, Debug)]
pub struct MotionSampler {
    pub timer: Timer,
}
impl FromWorld for MotionSampler {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<GameConfig>()
            .map(|c| c.tilt.update_interval)
            .unwrap_or(0.1);
        Self {
            timer: Timer::from_seconds(interval.max(0.01), TimerMode::Repeating),
        }
    }
}

pub fn emulate_accelerometer(
    cfg: Res<GameConfig>,
    emulation: Res<MotionEmulation>,
    input_map: Option<Res<InputMap>>,
    mut sample: ResMut<MotionSample>,
) {
    if !emulation.enabled || cfg.tilt.source != TiltSource::Accelerometer {
        return;
    }
    let Some(input_map) = input_map else {
        return;
    };
    let tilt = Vec2::new(input_map.virtual_axis("TiltX"), input_map.virtual_axis("TiltY"));
    sample.push(cfg.tilt.orientation.accel_for_tilt(tilt));
}

/// On every sensor tick, derive gravity from the latest sample.
pub fn sample_motion(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    sample: Res<MotionSample>,
    mut sampler: ResMut<MotionSampler>,
    mut gravity: ResMut<TiltGravity>,
) {
    if cfg.tilt.source != TiltSource::Accelerometer {
        return;
    }
    // Non-positive interval: sample every frame.
    let interval = cfg.tilt.update_interval;
    if interval > 0.0 {
        if (sampler.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
            sampler
                .timer
                .set_duration(std::time::Duration::from_secs_f32(interval));
        }
        if !sampler.timer.tick(time.delta()).just_finished() {
            return;
        }
    }
    let Some(accel) = sample.acceleration else {
        return;
    };
    let g = cfg.tilt.orientation.gravity_from(accel, cfg.tilt.scale);
    if gravity.0 != g {
        trace!(target: "tilt", "gravity -> ({:.2}, {:.2})", g.x, g.y);
        gravity.0 = g;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_swaps_axes_with_sign_flip() {
        let g = DeviceOrientation::LandscapeRight.gravity_from(Vec2::new(0.2, 0.5), 50.0);
        assert_eq!(g, Vec2::new(-25.0, 10.0));
    }

    #[test]
    fn portrait_flips_y_only() {
        let g = DeviceOrientation::Portrait.gravity_from(Vec2::new(0.2, 0.5), 50.0);
        assert_eq!(g, Vec2::new(10.0, -25.0));
    }

    #[test]
    fn accel_for_tilt_inverts_the_mapping() {
        for orientation in [DeviceOrientation::Portrait, DeviceOrientation::LandscapeRight] {
            for tilt in [Vec2::X, Vec2::NEG_Y, Vec2::new(0.5, -0.25)] {
                let accel = orientation.accel_for_tilt(tilt);
                assert_eq!(orientation.gravity_from(accel, 1.0), tilt, "{orientation:?}");
            }
        }
    }
}
