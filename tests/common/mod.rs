#![allow(dead_code)]
use std::time::Duration;

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::CollisionEvent;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

use tilt_ball::gameplay::RngSeed;
use tilt_ball::{CoreGamePlugin, GameConfig, MarkerKind, Player};

pub const FRAME: Duration = Duration::from_millis(50);

/// Rules, input and tilt without window, render or rapier. Runs one frame so
/// the initial scene exists on return.
pub fn headless_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(cfg)
        .insert_resource(RngSeed(7))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Touches>()
        .add_event::<CollisionEvent>()
        .add_plugins(CoreGamePlugin);
    app.update();
    app
}

pub fn players(app: &mut App) -> Vec<Entity> {
    let mut q = app.world_mut().query_filtered::<Entity, With<Player>>();
    q.iter(app.world()).collect()
}

pub fn player(app: &mut App) -> Entity {
    let all = players(app);
    assert_eq!(all.len(), 1, "expected exactly one player, found {}", all.len());
    all[0]
}

pub fn markers(app: &mut App, kind: MarkerKind) -> Vec<Entity> {
    let mut q = app.world_mut().query::<(Entity, &MarkerKind)>();
    q.iter(app.world())
        .filter(|(_, k)| **k == kind)
        .map(|(e, _)| e)
        .collect()
}

pub fn marker(app: &mut App, kind: MarkerKind) -> Entity {
    let all = markers(app, kind);
    assert!(!all.is_empty(), "no {kind:?} marker");
    all[0]
}

pub fn touch(app: &mut App, player: Entity, marker: Entity) {
    app.world_mut()
        .send_event(CollisionEvent::Started(player, marker, CollisionEventFlags::SENSOR));
}

pub fn run_frames(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}
