use bevy::prelude::*;

/// Marker component identifying the player ball (holds physics body & collider).
#[derive(Component, Debug)]
pub struct Player;

/// Logical radius used both for the collider and rendering scale.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct BallRadius(pub f32);

/// What a static marker does when the player touches it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Star,
    Skull,
    Finish,
}

impl MarkerKind {
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Star => "star",
            MarkerKind::Skull => "skull",
            MarkerKind::Finish => "finish",
        }
    }
}

/// Arena boundary segment.
#[derive(Component, Debug)]
pub struct Wall;

/// Tag for the mesh child drawn under a player / marker body.
#[derive(Component)]
pub struct BodyVisual;

/// Everything torn down on restart carries this.
#[derive(Component, Debug, Default)]
pub struct GameplayEntity;
