use std::time::Duration;

use exodo_core::{
    CatalogError, CategoryMenu, Controller, Debouncer, FactRecord, MapRecord, Surface, View,
    ViewState, SEARCH_DEBOUNCE,
};

/// Keys the dashboard reacts to, decoupled from the DOM event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Esc,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Categories,
    Cards,
    Maps,
}

/// Keeps the last view and the fragment waiting to be written to the
/// address bar on the next frame.
#[derive(Debug)]
pub struct WebSurface {
    pub view: View,
    pub menu: CategoryMenu,
    pub pending_fragment: Option<String>,
    pub errors: Vec<String>,
}

impl Default for WebSurface {
    fn default() -> Self {
        Self {
            view: View::loading(ViewState::default()),
            menu: CategoryMenu::default(),
            pending_fragment: None,
            errors: Vec::new(),
        }
    }
}

impl Surface for WebSurface {
    fn render(&mut self, view: &View) {
        self.view = view.clone();
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.pending_fragment = Some(fragment.to_string());
    }

    fn populate_menu(&mut self, menu: &CategoryMenu) {
        self.menu = menu.clone();
    }

    fn report_load_error(&mut self, error: &CatalogError, _fatal: bool) {
        self.errors.push(error.to_string());
    }
}

pub struct WebApp {
    pub controller: Controller<WebSurface>,
    pub focus: Focus,
    pub search_input: String,
    pub debouncer: Debouncer<String>,
    pub menu_index: usize,
    pub card_index: usize,
    pub expanded_card: Option<usize>,
    pub map_index: usize,
    pub open_map: Option<usize>,
}

impl WebApp {
    pub fn new(fragment: &str) -> Self {
        let mut app = Self {
            controller: Controller::new(WebSurface::default()),
            focus: Focus::Search,
            search_input: String::new(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            menu_index: 0,
            card_index: 0,
            expanded_card: None,
            map_index: 0,
            open_map: None,
        };
        app.navigate(fragment);
        app
    }

    pub fn view(&self) -> &View {
        &self.controller.surface().view
    }

    pub fn menu(&self) -> &CategoryMenu {
        &self.controller.surface().menu
    }

    pub fn facts_loaded(&mut self, result: Result<Vec<FactRecord>, CatalogError>) {
        self.controller.facts_loaded(result);
        self.sync_menu_index();
        self.reset_selection();
    }

    pub fn maps_loaded(&mut self, result: Result<Vec<MapRecord>, CatalogError>) {
        self.controller.maps_loaded(result);
        self.sync_menu_index();
        self.reset_selection();
    }

    /// `hashchange` and the initial address. Any fragment the controller
    /// queued is now stale.
    pub fn navigate(&mut self, fragment: &str) {
        self.debouncer.cancel_pending();
        self.controller.navigate(fragment);
        self.controller.surface_mut().pending_fragment = None;
        self.search_input = self.controller.state().query.clone();
        self.sync_menu_index();
        self.reset_selection();
    }

    pub fn take_pending_fragment(&mut self) -> Option<String> {
        self.controller.surface_mut().pending_fragment.take()
    }

    /// Runs a debounced search whose quiet period has passed.
    pub fn tick(&mut self, now: Duration) {
        if let Some(query) = self.debouncer.poll(now) {
            self.controller.search(&query);
            self.reset_selection();
        }
    }

    pub fn handle_key(&mut self, key: Key, now: Duration) {
        if self.open_map.is_some() {
            if matches!(key, Key::Esc | Key::Enter) {
                self.open_map = None;
            }
            return;
        }

        match key {
            Key::Tab => self.cycle_focus(true),
            Key::BackTab => self.cycle_focus(false),
            _ => match self.focus {
                Focus::Search => self.search_key(key, now),
                Focus::Categories => self.categories_key(key),
                Focus::Cards => self.cards_key(key),
                Focus::Maps => self.maps_key(key),
            },
        }
    }

    pub fn opened_map(&self) -> Option<&MapRecord> {
        let maps = self.view().maps.as_deref()?;
        self.open_map.and_then(|index| maps.get(index))
    }

    fn search_key(&mut self, key: Key, now: Duration) {
        match key {
            Key::Char(ch) => self.search_input.push(ch),
            Key::Backspace => {
                if self.search_input.pop().is_none() {
                    return;
                }
            }
            Key::Esc => self.search_input.clear(),
            Key::Enter => {
                self.debouncer.cancel_pending();
                let query = self.search_input.clone();
                self.controller.search(&query);
                self.reset_selection();
                return;
            }
            Key::Down => {
                self.focus = Focus::Cards;
                return;
            }
            _ => return,
        }
        self.debouncer.schedule(now, self.search_input.clone());
    }

    fn categories_key(&mut self, key: Key) {
        let len = self.menu().len();
        match key {
            Key::Up if len > 0 => self.menu_index = (self.menu_index + len - 1) % len,
            Key::Down if len > 0 => self.menu_index = (self.menu_index + 1) % len,
            Key::Enter | Key::Char(' ') => {
                let Some(key) = self.menu().get(self.menu_index).map(|e| e.key.clone()) else {
                    return;
                };
                self.controller.select_category(&key);
                self.reset_selection();
            }
            _ => {}
        }
    }

    fn cards_key(&mut self, key: Key) {
        let len = self.view().cards.len();
        match key {
            Key::Up => self.card_index = self.card_index.saturating_sub(1),
            Key::Down if self.card_index + 1 < len => self.card_index += 1,
            Key::Enter | Key::Char(' ') if len > 0 => {
                self.expanded_card = if self.expanded_card == Some(self.card_index) {
                    None
                } else {
                    Some(self.card_index)
                };
            }
            Key::Esc => self.expanded_card = None,
            _ => {}
        }
    }

    fn maps_key(&mut self, key: Key) {
        let len = self.view().maps.as_ref().map_or(0, Vec::len);
        match key {
            Key::Left | Key::Up if len > 0 => self.map_index = (self.map_index + len - 1) % len,
            Key::Right | Key::Down if len > 0 => self.map_index = (self.map_index + 1) % len,
            Key::Enter | Key::Char(' ') if self.map_index < len => {
                self.open_map = Some(self.map_index);
            }
            _ => {}
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Focus::Search, Focus::Categories, Focus::Cards];
        if self.view().maps.is_some() {
            order.push(Focus::Maps);
        }
        let len = order.len();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus = order[next];
    }

    fn sync_menu_index(&mut self) {
        let category = self.controller.state().category.clone();
        if let Some(index) = self.menu().position(&category) {
            self.menu_index = index;
        }
    }

    fn reset_selection(&mut self) {
        self.card_index = 0;
        self.expanded_card = None;
        self.map_index = 0;
        self.open_map = None;
        if self.focus == Focus::Maps && self.view().maps.is_none() {
            self.focus = Focus::Cards;
        }
    }
}
