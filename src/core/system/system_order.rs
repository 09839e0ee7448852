//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. Input (action map evaluation, motion sampling)
//! 2. PrePhysics (gravity derived from tilt written into rapier)
//! 3. Rapier (handled by plugin, PostUpdate)
//! 4. Contacts (collision events from the previous step turned into outcomes)
//! 5. PostPhysicsAdjust (respawn sequences, HUD refresh)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct TiltInputSet; // motion / pointer sampling

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // gravity applied before physics simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ContactSet; // player/marker contact resolution

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // lightweight corrections after physics
