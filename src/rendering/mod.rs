pub mod camera;
pub mod hud;
pub mod materials;
pub mod palette;
