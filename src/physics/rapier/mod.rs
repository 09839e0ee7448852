pub mod rapier_physics;
