pub mod hud;
pub mod input;
pub mod overlay;
pub mod round;
