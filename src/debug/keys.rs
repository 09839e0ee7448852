#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_key_input_system(input_map: Option<Res<InputMap>>, mut state: ResMut<DebugState>) {
    let Some(input_map) = input_map else {
        return;
    };
    if input_map.just_pressed("ToggleWireframe") {
        state.wireframe = !state.wireframe;
        info!(
            "WIREFRAME {} frame={}",
            if state.wireframe { "on" } else { "off" },
            state.frame_counter
        );
    }
    if input_map.just_pressed("ToggleOverlay") {
        state.overlay_visible = !state.overlay_visible;
    }
}
