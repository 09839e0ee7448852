use bevy::prelude::*;

use super::types::InputMap;
use super::parse::parse_input_toml;
use super::systems::{system_evaluate_bindings, system_update_virtual_axes};

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

pub const DEFAULT_INPUT_CONFIG: &str = "assets/config/input.toml";

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .configure_sets(PreUpdate, InputActionUpdateSet)
            .add_systems(PreStartup, load_initial_input_map)
            .add_systems(PreUpdate, (system_evaluate_bindings, system_update_virtual_axes).in_set(InputActionUpdateSet).after(bevy::input::InputSystem));
    }
}

fn load_initial_input_map(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")] let raw: String = include_str!("../../../assets/config/input.toml").to_string();
    #[cfg(not(target_arch = "wasm32"))] let raw: String = {
        let path = std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_INPUT_CONFIG.into());
        match std::fs::read_to_string(&path) { Ok(raw) => raw, Err(e) => { warn!(target: "input", "input map {path} unreadable ({e}); no actions bound"); String::new() } }
    };
    let parsed = parse_input_toml(&raw, cfg!(feature = "debug"));
    if !parsed.errors.is_empty() { for e in parsed.errors { error!(target: "input", "INPUT MAP ERROR: {e}"); } } else { info!(target: "input", "Input map loaded: {} actions, {} axes", parsed.input_map.actions.len(), parsed.input_map.virtual_axes.len()); }
    commands.insert_resource(parsed.input_map);
}
