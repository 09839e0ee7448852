use bevy::input::touch::{touch_screen_input_system, TouchInput, TouchPhase, Touches};
use bevy::prelude::*;

use tilt_ball::interaction::tilt::pointer::track_touch;
use tilt_ball::interaction::tilt::LastTouch;

const HELD: Vec2 = Vec2::new(120.0, -40.0);

fn touch_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_event::<TouchInput>()
        .init_resource::<Touches>()
        .init_resource::<ButtonInput<MouseButton>>()
        .insert_resource(LastTouch(Some(HELD)))
        .add_systems(PreUpdate, touch_screen_input_system)
        .add_systems(Update, track_touch);
    let window = app.world_mut().spawn_empty().id();
    (app, window)
}

fn send(app: &mut App, window: Entity, id: u64, phase: TouchPhase) {
    app.world_mut().send_event(TouchInput {
        phase,
        position: Vec2::new(10.0, 10.0),
        window,
        force: None,
        id,
    });
}

fn last_touch(app: &App) -> Option<Vec2> {
    app.world().resource::<LastTouch>().0
}

#[test]
fn ended_touch_clears_last_position() {
    let (mut app, window) = touch_app();
    send(&mut app, window, 0, TouchPhase::Started);
    app.update();
    assert_eq!(last_touch(&app), Some(HELD), "held touch keeps its position");

    send(&mut app, window, 0, TouchPhase::Ended);
    app.update();
    assert_eq!(last_touch(&app), None);
}

#[test]
fn cancelled_touch_clears_last_position() {
    let (mut app, window) = touch_app();
    send(&mut app, window, 3, TouchPhase::Started);
    app.update();
    assert_eq!(last_touch(&app), Some(HELD));

    send(&mut app, window, 3, TouchPhase::Canceled);
    app.update();
    assert_eq!(last_touch(&app), None);
}

#[test]
fn mouse_release_clears_last_position() {
    let (mut app, _window) = touch_app();
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    assert_eq!(last_touch(&app), Some(HELD));

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .release(MouseButton::Left);
    app.update();
    assert_eq!(last_touch(&app), None);
}
