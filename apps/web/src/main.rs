mod fetch;
mod state;
mod ui;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use exodo_core::{parse_facts, parse_maps, CatalogError};
use ratzilla::event::{KeyCode, KeyEvent};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;

use crate::fetch::fetch_text;
use crate::state::{Key, WebApp};

const FACTS_URL: &str = "data.json";
const MAPS_URL: &str = "maps.json";

fn main() -> io::Result<()> {
    let app = Rc::new(RefCell::new(WebApp::new(&current_hash())));

    spawn_local(load_facts(app.clone()));
    spawn_local(load_maps(app.clone()));
    listen_for_hash_changes(app.clone());

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = app.clone();
        move |event| {
            if let Some(key) = key_from(&event) {
                app.borrow_mut().handle_key(key, now());
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut app = app.borrow_mut();
        app.tick(now());
        if let Some(fragment) = app.take_pending_fragment() {
            replace_fragment(&fragment);
        }
        ui::render(&app, f);
    });

    Ok(())
}

/// Milliseconds since the epoch as the debouncer's clock.
fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
}

fn key_from(event: &KeyEvent) -> Option<Key> {
    let key = match event.code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab if event.shift => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return None,
    };
    Some(key)
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

/// Rewrites the address without adding a history entry. An empty fragment
/// drops the `#` entirely.
fn replace_fragment(fragment: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let url = if fragment.is_empty() {
        format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        )
    } else {
        format!("#{fragment}")
    };

    let replaced = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
    if let Err(error) = replaced {
        web_sys::console::warn_1(&format!("Failed to update the address: {error:?}").into());
    }
}

fn listen_for_hash_changes(app: Rc<RefCell<WebApp>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let on_hash_change = Closure::<dyn FnMut()>::new(move || {
        app.borrow_mut().navigate(&current_hash());
    });
    if let Err(error) = window
        .add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref())
    {
        web_sys::console::error_1(&format!("Failed to listen for hashchange: {error:?}").into());
    }
    // The listener lives as long as the page.
    on_hash_change.forget();
}

fn log_failure(error: &CatalogError, fatal: bool) {
    let message = format!("Failed to load {}: {error}", error.resource());
    if fatal {
        web_sys::console::error_1(&message.into());
    } else {
        web_sys::console::warn_1(&message.into());
    }
}

async fn load_facts(app: Rc<RefCell<WebApp>>) {
    let result = fetch_text(FACTS_URL)
        .await
        .and_then(|body| parse_facts(FACTS_URL, &body));
    if let Err(error) = &result {
        log_failure(error, true);
    }
    app.borrow_mut().facts_loaded(result);
}

async fn load_maps(app: Rc<RefCell<WebApp>>) {
    let result = fetch_text(MAPS_URL)
        .await
        .and_then(|body| parse_maps(MAPS_URL, &body));
    if let Err(error) = &result {
        log_failure(error, false);
    }
    app.borrow_mut().maps_loaded(result);
}
