// Rendering for the terminal browser

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::browser::render_browser(app, f);

    if let Some(map) = app.opened_map() {
        screens::map_modal::render_map_modal(map, f);
    }

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
