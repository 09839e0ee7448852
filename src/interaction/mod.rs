pub mod inputmap;
pub mod session;
pub mod tilt;
