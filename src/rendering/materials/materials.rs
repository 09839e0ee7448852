use crate::core::components::MarkerKind;
use crate::rendering::palette::palette::{color_for_marker, PLAYER_COLOR, WALL_COLOR};
use bevy::prelude::*;

/// Shared meshes and colors for every body in the arena. Absent in headless
/// runs; spawners then create bodies without a visual child.
#[derive(Resource, Debug, Clone)]
pub struct MarkerVisuals {
    /// Unit-diameter circle, scaled per body.
    pub circle: Handle<Mesh>,
    /// Unit square, scaled per wall.
    pub square: Handle<Mesh>,
    pub player: Handle<ColorMaterial>,
    pub star: Handle<ColorMaterial>,
    pub skull: Handle<ColorMaterial>,
    pub finish: Handle<ColorMaterial>,
    pub wall: Handle<ColorMaterial>,
}

impl MarkerVisuals {
    pub fn material_for(&self, kind: MarkerKind) -> Handle<ColorMaterial> {
        match kind {
            MarkerKind::Star => self.star.clone(),
            MarkerKind::Skull => self.skull.clone(),
            MarkerKind::Finish => self.finish.clone(),
        }
    }
}

impl FromWorld for MarkerVisuals {
    fn from_world(world: &mut World) -> Self {
        let (circle, square) = {
            let mut meshes = world.resource_mut::<Assets<Mesh>>();
            (
                meshes.add(Circle { radius: 0.5 }),
                meshes.add(Rectangle::new(1.0, 1.0)),
            )
        };
        let mut materials = world.resource_mut::<Assets<ColorMaterial>>();
        Self {
            circle,
            square,
            player: materials.add(PLAYER_COLOR),
            star: materials.add(color_for_marker(MarkerKind::Star)),
            skull: materials.add(color_for_marker(MarkerKind::Skull)),
            finish: materials.add(color_for_marker(MarkerKind::Finish)),
            wall: materials.add(WALL_COLOR),
        }
    }
}

pub struct MaterialsPlugin;

impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        // Built eagerly: the initial OnEnter(Playing) spawn runs before Startup.
        let world = app.world();
        if world.contains_resource::<Assets<Mesh>>() && world.contains_resource::<Assets<ColorMaterial>>() {
            app.init_resource::<MarkerVisuals>();
        } else {
            warn!("MaterialsPlugin: mesh/material assets unavailable; bodies will spawn without visuals");
        }
    }
}
