pub mod contacts;
pub mod respawn;
pub mod spawn;
pub mod state;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::system::system_order::ContactSet;

pub use contacts::classify_contact;
pub use respawn::{RespawnFinished, RespawnPlugin, RespawnReason, RespawnSequence};
pub use spawn::spawn::{BallSpawnPlugin, GameRng, RngSeed};
pub use state::{ContactOutcome, ContactResolved, Scoreboard};

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scoreboard>()
            .add_event::<ContactResolved>()
            .add_plugins((BallSpawnPlugin, RespawnPlugin))
            .add_systems(
                Update,
                contacts::handle_player_contacts
                    .in_set(ContactSet)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}
