//! Score / lives labels and the game-over banner.
use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::state::Scoreboard;
use crate::rendering::palette::palette::{GAME_OVER_COLOR, HUD_TEXT_COLOR};

#[derive(Component)]
pub struct ScoreLabel;

#[derive(Component)]
pub struct LivesLabel;

#[derive(Component)]
pub struct GameOverBanner;

pub const RESTART_HINT: &str = "Press R or Space to play again";

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_label(lives: u32) -> String {
    format!("Lives: {lives}")
}

pub fn game_over_text() -> String {
    format!("GAME OVER\n{RESTART_HINT}")
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, refresh_labels.in_set(PostPhysicsAdjustSet))
            .add_systems(OnEnter(AppState::GameOver), show_game_over)
            .add_systems(OnExit(AppState::GameOver), hide_game_over);
    }
}

fn spawn_hud(mut commands: Commands, cfg: Res<GameConfig>, scoreboard: Option<Res<Scoreboard>>) {
    let (score, lives) = scoreboard
        .map(|s| (s.score, s.lives))
        .unwrap_or((0, cfg.rules.start_lives));
    let margin = Val::Px(cfg.hud.margin);
    let font = TextFont {
        font_size: cfg.hud.font_size,
        ..Default::default()
    };
    commands.spawn((
        Text::new(score_label(score)),
        font.clone(),
        TextColor(HUD_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: margin,
            left: margin,
            ..Default::default()
        },
        ScoreLabel,
    ));
    commands.spawn((
        Text::new(lives_label(lives)),
        font,
        TextColor(HUD_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: margin,
            right: margin,
            ..Default::default()
        },
        LivesLabel,
    ));
}

pub fn refresh_labels(
    scoreboard: Res<Scoreboard>,
    mut q_score: Query<&mut Text, (With<ScoreLabel>, Without<LivesLabel>)>,
    mut q_lives: Query<&mut Text, (With<LivesLabel>, Without<ScoreLabel>)>,
) {
    if !scoreboard.is_changed() {
        return;
    }
    for mut text in q_score.iter_mut() {
        text.0 = score_label(scoreboard.score);
    }
    for mut text in q_lives.iter_mut() {
        text.0 = lives_label(scoreboard.lives);
    }
}

fn show_game_over(mut commands: Commands, cfg: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..Default::default()
            },
            GameOverBanner,
        ))
        .with_children(|p| {
            p.spawn((
                Text::new(game_over_text()),
                TextFont {
                    font_size: cfg.hud.font_size * 2.0,
                    ..Default::default()
                },
                TextColor(GAME_OVER_COLOR),
                TextLayout::new_with_justify(JustifyText::Center),
            ));
        });
}

fn hide_game_over(mut commands: Commands, q: Query<Entity, With<GameOverBanner>>) {
    for e in q.iter() {
        commands.entity(e).despawn();
    }
}
