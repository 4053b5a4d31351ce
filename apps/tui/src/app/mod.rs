// Application state and key handling for the terminal browser

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, Focus, LoadEvent};
