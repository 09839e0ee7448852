mod common;

use bevy::prelude::*;
use bevy_rapier2d::prelude::RigidBody;

use common::*;
use tilt_ball::gameplay::{RespawnSequence, Scoreboard};
use tilt_ball::{AppState, GameConfig, MarkerKind};

fn scoreboard(app: &App) -> Scoreboard {
    app.world().resource::<Scoreboard>().clone()
}

#[test]
fn initial_scene_has_one_of_each() {
    let mut app = headless_app(GameConfig::default());
    assert_eq!(players(&mut app).len(), 1);
    assert_eq!(markers(&mut app, MarkerKind::Star).len(), 1);
    assert_eq!(markers(&mut app, MarkerKind::Skull).len(), 1);
    assert_eq!(markers(&mut app, MarkerKind::Finish).len(), 1);
    assert_eq!(scoreboard(&app), Scoreboard { score: 0, lives: 5 });
}

#[test]
fn star_scores_once_and_disappears() {
    let mut app = headless_app(GameConfig::default());
    let p = player(&mut app);
    let star = marker(&mut app, MarkerKind::Star);
    // Same star reported twice in one frame (both pair orders).
    touch(&mut app, p, star);
    touch(&mut app, star, p);
    app.update();
    assert_eq!(scoreboard(&app).score, 1);
    assert!(app.world().get_entity(star).is_err(), "star should be despawned");
    assert!(app.world().get::<RespawnSequence>(p).is_none());
}

#[test]
fn skull_costs_a_life_and_freezes_player() {
    let mut app = headless_app(GameConfig::default());
    let p = player(&mut app);
    let skull = marker(&mut app, MarkerKind::Skull);
    touch(&mut app, p, skull);
    app.update();
    assert_eq!(scoreboard(&app), Scoreboard { score: 0, lives: 4 });
    assert!(app.world().get::<RespawnSequence>(p).is_some());
    assert_eq!(
        app.world().get::<RigidBody>(p),
        Some(&RigidBody::KinematicPositionBased)
    );
    // Skull stays in place.
    assert!(app.world().get_entity(skull).is_ok());
}

#[test]
fn contacts_during_respawn_are_ignored() {
    let mut app = headless_app(GameConfig::default());
    let p = player(&mut app);
    let skull = marker(&mut app, MarkerKind::Skull);
    let finish = marker(&mut app, MarkerKind::Finish);
    // Skull and finish in the same frame: only the first applies.
    touch(&mut app, p, skull);
    touch(&mut app, p, finish);
    app.update();
    assert_eq!(scoreboard(&app), Scoreboard { score: 0, lives: 4 });

    // Later frames while the sequence runs.
    let star = marker(&mut app, MarkerKind::Star);
    touch(&mut app, p, star);
    touch(&mut app, p, skull);
    app.update();
    assert_eq!(scoreboard(&app), Scoreboard { score: 0, lives: 4 });
    assert!(app.world().get_entity(star).is_ok());
}

#[test]
fn wall_and_marker_pairs_are_ignored() {
    let mut app = headless_app(GameConfig::default());
    let star = marker(&mut app, MarkerKind::Star);
    let skull = marker(&mut app, MarkerKind::Skull);
    touch(&mut app, star, skull);
    app.update();
    assert_eq!(scoreboard(&app), Scoreboard { score: 0, lives: 5 });
}

#[test]
fn last_life_ends_the_game_and_restart_rebuilds() {
    let mut cfg = GameConfig::default();
    cfg.rules.start_lives = 1;
    let mut app = headless_app(cfg);
    let p = player(&mut app);
    let skull = marker(&mut app, MarkerKind::Skull);
    touch(&mut app, p, skull);
    run_frames(&mut app, 2);
    assert_eq!(scoreboard(&app).lives, 0);
    assert_eq!(*app.world().resource::<State<AppState>>().get(), AppState::GameOver);
    // Frozen in place, no respawn sequence.
    assert!(app.world().get_entity(p).is_ok());
    assert!(app.world().get::<RespawnSequence>(p).is_none());

    // Nothing applies once the game is over.
    let star = marker(&mut app, MarkerKind::Star);
    touch(&mut app, p, star);
    app.update();
    assert_eq!(scoreboard(&app).score, 0);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyR);
    run_frames(&mut app, 2);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::KeyR);
    app.update();

    assert_eq!(*app.world().resource::<State<AppState>>().get(), AppState::Playing);
    assert_eq!(scoreboard(&app), Scoreboard { score: 0, lives: 1 });
    assert_eq!(players(&mut app).len(), 1);
    assert_ne!(player(&mut app), p);
    assert_eq!(markers(&mut app, MarkerKind::Star).len(), 1);
    assert_eq!(markers(&mut app, MarkerKind::Skull).len(), 1);
    assert_eq!(markers(&mut app, MarkerKind::Finish).len(), 1);
}
