pub mod browser;
pub mod help;
pub mod map_modal;
