use bevy::prelude::*;

use crate::core::components::MarkerKind;

pub const PLAYER_COLOR: Color = Color::srgb(0.10, 0.60, 1.0); // Electric blue
pub const WALL_COLOR: Color = Color::srgb(0.22, 0.24, 0.32);
pub const BACKGROUND_COLOR: Color = Color::srgb(0.03, 0.03, 0.06);
pub const HUD_TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
pub const GAME_OVER_COLOR: Color = Color::srgb(1.0, 0.15, 0.20); // Vivid warm red

#[inline]
pub fn color_for_marker(kind: MarkerKind) -> Color {
    match kind {
        MarkerKind::Star => Color::srgb(1.0, 1.0, 0.25),   // Bright lemon yellow
        MarkerKind::Skull => Color::srgb(0.85, 0.85, 0.80), // Bone
        MarkerKind::Finish => Color::srgb(0.15, 0.95, 0.55), // Bright spring green
    }
}
