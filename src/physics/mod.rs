pub mod categories;
pub mod rapier;
