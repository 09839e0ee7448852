use crate::core::config::GameConfig;
use bevy::prelude::*;

/// Counts down `window.autoClose` seconds (0 = never) and then exits.
#[derive(Resource, Deref, DerefMut)]
pub struct SessionDeadline(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_deadline)
            .add_systems(Update, exit_at_deadline);
    }
}

fn arm_deadline(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "session will exit after {secs} seconds");
        commands.insert_resource(SessionDeadline(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn exit_at_deadline(
    time: Res<Time>,
    deadline: Option<ResMut<SessionDeadline>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(mut deadline) = deadline else {
        return;
    };
    if deadline.tick(time.delta()).just_finished() {
        info!("session deadline reached, requesting exit");
        ev_exit.write(AppExit::Success);
    }
}
