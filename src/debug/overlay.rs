#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};

#[cfg(feature = "debug")]
#[derive(Component)]
pub(crate) struct DebugOverlayText;

#[cfg(feature = "debug")]
pub fn debug_overlay_spawn(mut commands: Commands) {
    commands.spawn((
        Text::new(String::new()),
        TextFont {
            font_size: 14.0,
            ..Default::default()
        },
        TextColor(Color::srgb(0.75, 0.85, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(4.0),
            left: Val::Px(6.0),
            ..Default::default()
        },
        DebugOverlayText,
    ));
}

#[cfg(feature = "debug")]
pub(crate) fn debug_overlay_update(
    state: Res<DebugState>,
    stats: Res<DebugStats>,
    mut q_text: Query<&mut Text, With<DebugOverlayText>>,
) {
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    if !state.overlay_visible {
        text.0.clear();
        return;
    }
    if !(state.is_changed() || stats.is_changed()) {
        return;
    }
    text.0 = format!(
        "fps {:.0} | gravity ({:.1}, {:.1}) | stars {} skulls {} | wireframe {} [F1] overlay [F2]",
        stats.fps,
        stats.gravity.x,
        stats.gravity.y,
        stats.stars,
        stats.skulls,
        if state.wireframe { "on" } else { "off" },
    );
}
