//! Collision categories and the rapier group filters derived from them.
//!
//! Bit values are part of the game's data model: player = 1, finish = 2,
//! star = 4, wall = 8, skull = 16. Markers only ever admit the player, so
//! marker/marker and marker/wall pairs never produce contact events.
use bevy_rapier2d::prelude::{CollisionGroups, Group};

use crate::core::components::MarkerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CollisionCategory {
    Player = 1,
    Finish = 2,
    Star = 4,
    Wall = 8,
    Skull = 16,
}

impl CollisionCategory {
    pub const ALL: [CollisionCategory; 5] = [
        CollisionCategory::Player,
        CollisionCategory::Finish,
        CollisionCategory::Star,
        CollisionCategory::Wall,
        CollisionCategory::Skull,
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    #[cfg(test)]
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.bits() == bits)
    }

    pub fn for_marker(kind: MarkerKind) -> Self {
        match kind {
            MarkerKind::Star => CollisionCategory::Star,
            MarkerKind::Skull => CollisionCategory::Skull,
            MarkerKind::Finish => CollisionCategory::Finish,
        }
    }

    #[cfg(test)]
    pub fn marker_kind(self) -> Option<MarkerKind> {
        match self {
            CollisionCategory::Star => Some(MarkerKind::Star),
            CollisionCategory::Skull => Some(MarkerKind::Skull),
            CollisionCategory::Finish => Some(MarkerKind::Finish),
            CollisionCategory::Player | CollisionCategory::Wall => None,
        }
    }

    /// Membership group for this category.
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self.bits())
    }

    /// Categories this body interacts with.
    pub fn filter(self) -> Group {
        let bits = match self {
            CollisionCategory::Player => {
                CollisionCategory::Finish.bits()
                    | CollisionCategory::Star.bits()
                    | CollisionCategory::Wall.bits()
                    | CollisionCategory::Skull.bits()
            }
            CollisionCategory::Finish
            | CollisionCategory::Star
            | CollisionCategory::Wall
            | CollisionCategory::Skull => CollisionCategory::Player.bits(),
        };
        Group::from_bits_truncate(bits)
    }

    pub fn collision_groups(self) -> CollisionGroups {
        CollisionGroups::new(self.group(), self.filter())
    }

    /// Whether two categories produce a pair at all (rapier tests both directions).
    #[cfg(test)]
    pub fn interacts_with(self, other: CollisionCategory) -> bool {
        self.filter().contains(other.group()) && other.filter().contains(self.group())
    }
}
