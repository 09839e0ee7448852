//! Debug module: feature gated collider wireframes, stats logging and overlay.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod modes;
#[cfg(feature = "debug")]
mod overlay;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use modes::*;

#[cfg(feature = "debug")]
use crate::core::system::system_order::PostPhysicsAdjustSet;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugPreRenderSet;

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier2d::render::DebugRenderContext;
        use keys::debug_key_input_system;
        use logging::debug_logging_system;
        #[cfg(not(test))]
        use overlay::{debug_overlay_spawn, debug_overlay_update};
        use stats::debug_stats_collect_system;

        fn toggle_rapier_debug(state: Res<DebugState>, ctx: Option<ResMut<DebugRenderContext>>) {
            if let Some(mut c) = ctx {
                if c.enabled != state.wireframe {
                    c.enabled = state.wireframe;
                }
            }
        }

        let start_wireframe = app
            .world()
            .get_resource::<crate::core::config::GameConfig>()
            .map(|c| c.rapier_debug)
            .unwrap_or(false);
        app.insert_resource(DebugState {
            wireframe: start_wireframe,
            ..Default::default()
        })
        .init_resource::<DebugStats>()
        .configure_sets(Update, DebugPreRenderSet.after(PostPhysicsAdjustSet));
        // In tests, skip overlay spawn (no UI pipeline with MinimalPlugins)
        #[cfg(not(test))]
        app.add_systems(Startup, debug_overlay_spawn);
        app.add_systems(
            Update,
            (
                debug_key_input_system,
                debug_stats_collect_system,
                toggle_rapier_debug,
                debug_logging_system,
                #[cfg(not(test))]
                debug_overlay_update,
            )
                .in_set(DebugPreRenderSet),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
