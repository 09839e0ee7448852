use bevy::prelude::*;

use crate::core::components::MarkerKind;
use crate::core::config::{GameConfig, RulesConfig};

/// Score and remaining lives for the current session.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub lives: u32,
}

impl Scoreboard {
    pub fn new(lives: u32) -> Self {
        Self { score: 0, lives }
    }

    pub fn from_rules(rules: &RulesConfig) -> Self {
        Self::new(rules.start_lives)
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Apply the effect of the player touching a `kind` marker at
    /// `marker_position`. Once the game is over every contact is ignored.
    pub fn apply(
        &mut self,
        kind: MarkerKind,
        marker_position: Vec2,
        rules: &RulesConfig,
    ) -> ContactOutcome {
        if self.is_game_over() {
            return ContactOutcome::Ignored;
        }
        match kind {
            MarkerKind::Star => {
                self.score = self.score.saturating_add(rules.star_points);
                ContactOutcome::Collected {
                    points: rules.star_points,
                }
            }
            MarkerKind::Skull => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    ContactOutcome::GameOver
                } else {
                    ContactOutcome::LifeLost {
                        remaining: self.lives,
                        respawn_toward: marker_position,
                    }
                }
            }
            MarkerKind::Finish => {
                self.score = self.score.saturating_add(rules.finish_points);
                ContactOutcome::LevelComplete {
                    points: rules.finish_points,
                    respawn_toward: marker_position,
                }
            }
        }
    }
}

impl FromWorld for Scoreboard {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<GameConfig>()
            .map(|c| Scoreboard::from_rules(&c.rules))
            .unwrap_or_else(|| Scoreboard::from_rules(&RulesConfig::default()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Star picked up; the star is removed.
    Collected { points: u32 },
    /// Skull hit with lives left; the player runs the respawn sequence.
    LifeLost { remaining: u32, respawn_toward: Vec2 },
    /// Skull hit on the last life.
    GameOver,
    /// Finish reached; the sequence ends in a fresh star, skull and player.
    LevelComplete { points: u32, respawn_toward: Vec2 },
    /// Contact after the game already ended.
    Ignored,
}

/// Emitted once per resolved player/marker contact.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContactResolved {
    pub kind: MarkerKind,
    pub outcome: ContactOutcome,
}
