use std::time::Duration;

use crossterm::event::KeyCode;

use crate::app::state::{App, Focus};

pub fn handle_search_input(app: &mut App, key: KeyCode, now: Duration) {
    match key {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.clear_search(now),
        KeyCode::Backspace => app.pop_search_char(now),
        KeyCode::Down => app.focus = Focus::Cards,
        KeyCode::Char(ch) => app.push_search_char(ch, now),
        _ => {}
    }
}

pub fn handle_categories_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Up | KeyCode::Char('k') => app.previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.next_category(),
        KeyCode::Home => app.menu_index = 0,
        KeyCode::End => app.menu_index = app.menu().len().saturating_sub(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_menu_entry(),
        _ => {}
    }
}

pub fn handle_cards_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Up | KeyCode::Char('k') => app.previous_card(),
        KeyCode::Down | KeyCode::Char('j') => app.next_card(),
        KeyCode::PageUp => {
            for _ in 0..5 {
                app.previous_card();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..5 {
                app.next_card();
            }
        }
        KeyCode::Home => app.card_index = 0,
        KeyCode::End => app.card_index = app.view().cards.len().saturating_sub(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_card(),
        KeyCode::Esc => app.expanded_card = None,
        _ => {}
    }
}

pub fn handle_maps_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') => app.previous_map(),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') => app.next_map(),
        KeyCode::Enter | KeyCode::Char(' ') => app.open_selected_map(),
        _ => {}
    }
}

pub fn handle_address_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.close_address_bar(),
        KeyCode::Enter => app.submit_address(),
        KeyCode::Backspace => {
            app.address_input.pop();
        }
        KeyCode::Char(ch) => app.address_input.push(ch),
        _ => {}
    }
}
