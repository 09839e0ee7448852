//! Tilt input: turns motion samples (or the touch-steer fallback) into the
//! world gravity vector.
pub mod motion;
pub mod pointer;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::system::system_order::TiltInputSet;

pub use motion::{MotionEmulation, MotionSample, MotionSampler, TiltGravity};
pub use pointer::LastTouch;

pub struct TiltPlugin;

impl Plugin for TiltPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionSample>()
            .init_resource::<MotionEmulation>()
            .init_resource::<MotionSampler>()
            .init_resource::<TiltGravity>()
            .init_resource::<LastTouch>()
            .add_systems(
                Update,
                (
                    (motion::emulate_accelerometer, motion::sample_motion).chain(),
                    (pointer::track_touch, pointer::steer_toward_touch).chain(),
                )
                    .in_set(TiltInputSet)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}
