use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::core::config::GameConfig;
use crate::rendering::palette::palette::BACKGROUND_COLOR;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND_COLOR))
            .add_systems(Startup, setup_camera)
            .add_systems(Update, refit_camera);
    }
}

/// Whole arena always visible; the window's spare axis shows background.
fn arena_projection(cfg: &GameConfig) -> Projection {
    Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::AutoMin {
            min_width: cfg.arena.width,
            min_height: cfg.arena.height,
        },
        ..OrthographicProjection::default_2d()
    })
}

fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.spawn((Camera2d, arena_projection(&cfg)));
}

fn refit_camera(cfg: Res<GameConfig>, mut q: Query<&mut Projection, With<Camera2d>>) {
    if !cfg.is_changed() {
        return;
    }
    for mut projection in q.iter_mut() {
        *projection = arena_projection(&cfg);
    }
}
