pub mod chrome;
pub mod hud;
pub mod menu;
