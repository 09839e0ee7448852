//! Systems for input action evaluation.
use bevy::prelude::*;
use super::types::*;

fn token_active(token: &RawBindingToken, keyboard: &ButtonInput<KeyCode>, mouse_buttons: &ButtonInput<MouseButton>) -> bool {
    match token { RawBindingToken::Key(k) => keyboard.pressed(*k), RawBindingToken::MouseBtn(b) => mouse_buttons.pressed(*b) }
}

pub fn system_evaluate_bindings(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut input_map: ResMut<InputMap>,
) {
    let dt = time.delta_secs();
    input_map.frame_counter += 1;
    for st in &mut input_map.states { st.clear_transitions(); }
    let total_bindings = input_map.bindings.len();
    if input_map.bindings_runtime.len() < total_bindings { input_map.bindings_runtime.resize(total_bindings, BindingRuntime::default()); }
    for brt in &mut input_map.bindings_runtime { brt.just_released = false; brt.just_pressed = false; }

    let InputMap { bindings, bindings_runtime, bindings_index, states, .. } = &mut *input_map;
    for binding in bindings.iter() {
        let all_active = binding.tokens.iter().all(|t| token_active(t, &keyboard, &mouse_buttons));
        let rt = &mut bindings_runtime[binding.id as usize];
        if all_active {
            if !rt.active { rt.active = true; rt.just_pressed = true; rt.hold_elapsed = 0.0; } else { rt.hold_elapsed += dt; }
        } else if rt.active {
            rt.active = false;
            rt.just_released = true;
        }
    }
    for (aid, bids) in bindings_index.iter() {
        let Some(state) = states.get_mut(aid.0 as usize) else { continue; };
        let was_pressed = state.pressed;
        let mut now_pressed = false;
        for bid in bids {
            let rt = &bindings_runtime[*bid as usize];
            let binding = &bindings[*bid as usize];
            if rt.active && rt.hold_elapsed >= binding.hold_secs { now_pressed = true; }
        }
        state.pressed = now_pressed;
        state.just_pressed = now_pressed && !was_pressed;
        state.just_released = !now_pressed && was_pressed;
    }
}

pub fn system_update_virtual_axes(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut input_map: ResMut<InputMap>,
) {
    let InputMap { virtual_axes, virtual_axis_values, .. } = &mut *input_map;
    virtual_axis_values.resize(virtual_axes.len(), 0.0);
    for (va, value) in virtual_axes.iter().zip(virtual_axis_values.iter_mut()) {
        let mut v = 0.0;
        if token_active(&va.pos, &keyboard, &mouse_buttons) { v += 1.0; }
        if token_active(&va.neg, &keyboard, &mouse_buttons) { v -= 1.0; }
        *value = (v * va.scale).clamp(-1.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::inputmap::parse::parse_input_toml;

    fn app_with_map(raw: &str) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.insert_resource(ButtonInput::<MouseButton>::default());
        app.insert_resource(parse_input_toml(raw, true).input_map);
        app.add_systems(Update, (system_evaluate_bindings, system_update_virtual_axes));
        app
    }

    #[test]
    fn action_press_and_release_transitions() {
        let mut app = app_with_map("[actions]\nRestart = {}\n[bindings]\nRestart = [\"Key:R\"]\n");
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyR);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(map.pressed("Restart") && map.just_pressed("Restart"));

        app.update();
        assert!(!app.world().resource::<InputMap>().just_pressed("Restart"));

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyR);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(!map.pressed("Restart") && map.just_released("Restart"));
    }

    #[test]
    fn virtual_axes_sum_and_clamp() {
        let raw = r#"
            [[virtual_axes]]
            name = "TiltX"
            pos = "Key:ArrowRight"
            neg = "Key:ArrowLeft"
            [[virtual_axes]]
            name = "TiltX"
            pos = "Key:D"
            neg = "Key:A"
        "#;
        let mut app = app_with_map(raw);
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::ArrowRight);
            keys.press(KeyCode::KeyD);
        }
        app.update();
        assert_eq!(app.world().resource::<InputMap>().virtual_axis("TiltX"), 1.0);

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::ArrowLeft);
        app.update();
        // Arrows cancel out; D is still held.
        assert_eq!(app.world().resource::<InputMap>().virtual_axis("TiltX"), 1.0);
        assert_eq!(app.world().resource::<InputMap>().virtual_axis("TiltY"), 0.0);
    }
}
