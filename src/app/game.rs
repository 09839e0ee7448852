// This file is part of Tilt Ball.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::app::state::AppState;
use crate::core::components::GameplayEntity;
use crate::core::config::GameConfig;
use crate::core::system::system_order::{ContactSet, PostPhysicsAdjustSet, PrePhysicsSet, TiltInputSet};
use crate::debug::DebugPlugin;
use crate::gameplay::state::Scoreboard;
use crate::gameplay::GameplayPlugin;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::hot_reload::InputMapHotReloadPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::inputmap::types::InputMap;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::tilt::{LastTouch, TiltGravity, TiltPlugin};
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::materials::materials::MaterialsPlugin;

/// Rules, input and tilt without any window, render or rapier plugin.
/// Shared by [`GamePlugin`] and headless tests.
pub struct CoreGamePlugin;

impl Plugin for CoreGamePlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<StatesPlugin>() {
            app.add_plugins(StatesPlugin);
        }
        app.init_state::<AppState>()
            .configure_sets(
                Update,
                (
                    TiltInputSet,
                    PrePhysicsSet.after(TiltInputSet),
                    ContactSet.after(PrePhysicsSet),
                    PostPhysicsAdjustSet.after(ContactSet),
                ),
            )
            .add_plugins((InputActionsPlugin, TiltPlugin, GameplayPlugin))
            .add_systems(
                Update,
                restart_on_action.run_if(in_state(AppState::GameOver)),
            )
            .add_systems(Update, quit_on_action);
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        // Visuals must exist before the initial OnEnter(Playing) spawn.
        app.add_plugins((CameraPlugin, MaterialsPlugin, PhysicsSetupPlugin))
            .add_plugins(CoreGamePlugin)
            .add_plugins((
                HudPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
                AutoClosePlugin,
                #[cfg(feature = "debug")]
                InputMapHotReloadPlugin,
            ));
    }
}

/// Clear the arena and the scoreboard, then go back to Playing, whose
/// OnEnter rebuilds the initial scene.
#[allow(clippy::too_many_arguments)]
pub fn restart_session(
    commands: &mut Commands,
    cfg: &GameConfig,
    scoreboard: &mut Scoreboard,
    gravity: &mut TiltGravity,
    last_touch: &mut LastTouch,
    gameplay: impl IntoIterator<Item = Entity>,
    next_state: &mut NextState<AppState>,
) {
    let mut removed = 0usize;
    for e in gameplay {
        commands.entity(e).despawn();
        removed += 1;
    }
    *scoreboard = Scoreboard::from_rules(&cfg.rules);
    gravity.0 = Vec2::ZERO;
    last_touch.0 = None;
    next_state.set(AppState::Playing);
    info!("session restarted ({removed} entities cleared)");
}

#[allow(clippy::too_many_arguments)]
fn restart_on_action(
    mut commands: Commands,
    input_map: Option<Res<InputMap>>,
    cfg: Res<GameConfig>,
    mut scoreboard: ResMut<Scoreboard>,
    mut gravity: ResMut<TiltGravity>,
    mut last_touch: ResMut<LastTouch>,
    q_gameplay: Query<Entity, With<GameplayEntity>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(input_map) = input_map else {
        return;
    };
    if !input_map.just_pressed("Restart") {
        return;
    }
    restart_session(
        &mut commands,
        &cfg,
        &mut scoreboard,
        &mut gravity,
        &mut last_touch,
        q_gameplay.iter(),
        &mut next_state,
    );
}

fn quit_on_action(input_map: Option<Res<InputMap>>, mut ev_exit: EventWriter<AppExit>) {
    if input_map.is_some_and(|m| m.just_pressed("Quit")) {
        info!("quit requested");
        ev_exit.write(AppExit::Success);
    }
}
