pub mod helpers;
mod panes;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::state::{App, Focus};

pub fn handle_input(app: &mut App, key: KeyEvent, now: Duration) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    if handle_help_toggle(app, key.code) {
        return;
    }

    if app.open_map.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_map();
        }
        return;
    }

    if app.focus == Focus::Address {
        panes::handle_address_input(app, key.code);
        return;
    }

    if ctrl && key.code == KeyCode::Char('l') {
        app.open_address_bar();
        return;
    }

    match key.code {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_previous(),
        KeyCode::Char(':') if app.focus != Focus::Search => app.open_address_bar(),
        _ => match app.focus {
            Focus::Search => panes::handle_search_input(app, key.code, now),
            Focus::Categories => panes::handle_categories_input(app, key.code),
            Focus::Cards => panes::handle_cards_input(app, key.code),
            Focus::Maps => panes::handle_maps_input(app, key.code),
            Focus::Address => {}
        },
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LoadEvent;
    use exodo_core::FactRecord;

    fn press(app: &mut App, code: KeyCode) {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE), Duration::ZERO);
    }

    fn app() -> App {
        let mut app = App::new("fatos.html", "");
        app.on_load(LoadEvent::Facts(Ok(vec![
            FactRecord::new("Moisés", "pessoas"),
            FactRecord::new("Maná", "eventos"),
        ])));
        app.on_load(LoadEvent::Maps(Ok(Vec::new())));
        app
    }

    #[test]
    fn typing_in_search_does_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));

        assert!(app.running);
        assert_eq!(app.search_input, "q");
        assert!(app.debouncer.is_pending());
    }

    #[test]
    fn q_quits_outside_text_fields() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Categories);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Duration::ZERO,
        );
        assert!(!app.running);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        press(&mut app, KeyCode::Char('x'));
        assert!(app.search_input.is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn category_pane_selects_with_enter() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        // all, maps, eventos, pessoas
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state().category, "eventos");
        assert_eq!(app.view().cards.len(), 1);
    }

    #[test]
    fn address_bar_round_trip() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.focus, Focus::Address);

        for ch in "busca=mana".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.focus, Focus::Categories);
        assert_eq!(app.search_input, "mana");
        assert_eq!(app.view().cards.len(), 1);
    }
}
