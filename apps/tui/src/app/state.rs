use std::time::{Duration, Instant};

use exodo_core::fragment::link;
use exodo_core::{
    CatalogError, CategoryMenu, Controller, Debouncer, FactRecord, MapRecord, Surface, View,
    ViewState, SEARCH_DEBOUNCE,
};
use tracing::debug;

use crate::app::input::helpers::{clamp_index, wrap_decrement, wrap_increment};

/// Results of the two background loads, delivered in whatever order they
/// complete.
#[derive(Debug)]
pub enum LoadEvent {
    Facts(Result<Vec<FactRecord>, CatalogError>),
    Maps(Result<Vec<MapRecord>, CatalogError>),
}

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Categories,
    Cards,
    Maps,
    Address,
}

/// Holds the last frame the controller produced.
#[derive(Debug)]
pub struct TerminalSurface {
    pub view: View,
    pub menu: CategoryMenu,
    pub fragment: String,
    pub errors: Vec<String>,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self {
            view: View::loading(ViewState::default()),
            menu: CategoryMenu::default(),
            fragment: String::new(),
            errors: Vec::new(),
        }
    }
}

impl Surface for TerminalSurface {
    fn render(&mut self, view: &View) {
        self.view = view.clone();
    }

    fn replace_fragment(&mut self, fragment: &str) {
        debug!(fragment, "address updated");
        self.fragment = fragment.to_string();
    }

    fn populate_menu(&mut self, menu: &CategoryMenu) {
        self.menu = menu.clone();
    }

    fn report_load_error(&mut self, error: &CatalogError, fatal: bool) {
        let message = if fatal {
            format!("Could not load {}", error.resource())
        } else {
            format!("Maps unavailable ({})", error.resource())
        };
        self.errors.push(message);
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub controller: Controller<TerminalSurface>,
    pub focus: Focus,
    /// Pane to return to when the address bar closes.
    pub previous_focus: Focus,
    pub search_input: String,
    pub address_input: String,
    pub debouncer: Debouncer<String>,
    pub started: Instant,
    pub menu_index: usize,
    pub card_index: usize,
    pub expanded_card: Option<usize>,
    pub map_index: usize,
    pub open_map: Option<usize>,
    pub show_help: bool,
    pub status_message: String,
    pub page: String,
}

impl App {
    pub fn new(page: &str, fragment: &str) -> Self {
        let mut app = Self {
            running: true,
            controller: Controller::new(TerminalSurface::default()),
            focus: Focus::Search,
            previous_focus: Focus::Search,
            search_input: String::new(),
            address_input: String::new(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            started: Instant::now(),
            menu_index: 0,
            card_index: 0,
            expanded_card: None,
            map_index: 0,
            open_map: None,
            show_help: false,
            status_message: "Loading catalog...".to_string(),
            page: page.to_string(),
        };
        app.navigate(fragment);
        app
    }

    /// Time since startup, the clock the debouncer runs on.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn view(&self) -> &View {
        &self.controller.surface().view
    }

    pub fn menu(&self) -> &CategoryMenu {
        &self.controller.surface().menu
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn share_link(&self) -> String {
        link(&self.page, self.state())
    }

    pub fn on_load(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Facts(result) => self.controller.facts_loaded(result),
            LoadEvent::Maps(result) => self.controller.maps_loaded(result),
        }

        self.status_message = self.controller.surface().errors.last().map_or_else(
            || {
                format!(
                    "{} facts, {} maps",
                    self.controller.facts().len(),
                    self.controller.maps().len()
                )
            },
            Clone::clone,
        );
        self.sync_menu_index();
        self.clamp_selection();
    }

    /// Records an edit of the search box; the recompute waits for the
    /// debounce window.
    pub fn edit_search(&mut self, now: Duration) {
        self.debouncer.schedule(now, self.search_input.clone());
    }

    pub fn push_search_char(&mut self, ch: char, now: Duration) {
        self.search_input.push(ch);
        self.edit_search(now);
    }

    pub fn pop_search_char(&mut self, now: Duration) {
        if self.search_input.pop().is_some() {
            self.edit_search(now);
        }
    }

    pub fn clear_search(&mut self, now: Duration) {
        if !self.search_input.is_empty() {
            self.search_input.clear();
            self.edit_search(now);
        }
    }

    /// Runs the search right away, dropping any pending debounced one.
    pub fn submit_search(&mut self) {
        self.debouncer.cancel_pending();
        let query = self.search_input.clone();
        self.controller.search(&query);
        self.after_state_change();
    }

    /// Fires the debounced search once its window has passed.
    pub fn tick(&mut self, now: Duration) {
        if let Some(query) = self.debouncer.poll(now) {
            self.controller.search(&query);
            self.after_state_change();
        }
    }

    pub fn select_menu_entry(&mut self) {
        let Some(key) = self.menu().get(self.menu_index).map(|entry| entry.key.clone()) else {
            return;
        };
        self.controller.select_category(&key);
        self.after_state_change();
    }

    pub fn next_category(&mut self) {
        self.menu_index = wrap_increment(self.menu_index, self.menu().len());
    }

    pub fn previous_category(&mut self) {
        self.menu_index = wrap_decrement(self.menu_index, self.menu().len());
    }

    /// Applies a fragment typed in the address bar or passed on the
    /// command line. The address keeps what was typed; the inputs follow
    /// the decoded state.
    pub fn navigate(&mut self, fragment: &str) {
        self.debouncer.cancel_pending();
        self.controller.surface_mut().fragment = fragment.trim_start_matches('#').to_string();
        self.controller.navigate(fragment);
        self.search_input = self.state().query.clone();
        self.sync_menu_index();
        self.after_state_change();
    }

    pub fn open_address_bar(&mut self) {
        if self.focus != Focus::Address {
            self.previous_focus = self.focus;
        }
        self.address_input = self.state().fragment();
        self.focus = Focus::Address;
    }

    pub fn close_address_bar(&mut self) {
        self.address_input.clear();
        self.focus = self.previous_focus;
    }

    /// Accepts `page#state`, `#state` or a bare `state`.
    pub fn submit_address(&mut self) {
        let input = self.address_input.trim().to_string();
        let fragment = input.split_once('#').map_or(input.as_str(), |(_, rest)| rest);
        self.navigate(fragment);
        self.close_address_bar();
    }

    pub fn next_card(&mut self) {
        let len = self.view().cards.len();
        if len > 0 && self.card_index + 1 < len {
            self.card_index += 1;
        }
    }

    pub fn previous_card(&mut self) {
        self.card_index = self.card_index.saturating_sub(1);
    }

    /// Expands the selected card, or collapses it if it is already open.
    pub fn toggle_card(&mut self) {
        if self.view().cards.is_empty() {
            return;
        }
        self.expanded_card = if self.expanded_card == Some(self.card_index) {
            None
        } else {
            Some(self.card_index)
        };
    }

    pub fn visible_maps(&self) -> &[MapRecord] {
        self.view().maps.as_deref().unwrap_or(&[])
    }

    pub fn next_map(&mut self) {
        self.map_index = wrap_increment(self.map_index, self.visible_maps().len());
    }

    pub fn previous_map(&mut self) {
        self.map_index = wrap_decrement(self.map_index, self.visible_maps().len());
    }

    pub fn open_selected_map(&mut self) {
        if self.map_index < self.visible_maps().len() {
            self.open_map = Some(self.map_index);
        }
    }

    pub fn close_map(&mut self) {
        self.open_map = None;
    }

    pub fn opened_map(&self) -> Option<&MapRecord> {
        self.open_map.and_then(|index| self.visible_maps().get(index))
    }

    /// Panes reachable with Tab; the gallery only while it is shown.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Search, Focus::Categories, Focus::Cards];
        if self.view().maps.is_some() {
            order.push(Focus::Maps);
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let current = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
        self.focus = order[wrap_increment(current, order.len())];
    }

    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        let current = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
        self.focus = order[wrap_decrement(current, order.len())];
    }

    fn sync_menu_index(&mut self) {
        let category = self.state().category.clone();
        if let Some(index) = self.menu().position(&category) {
            self.menu_index = index;
        }
    }

    fn after_state_change(&mut self) {
        self.card_index = 0;
        self.expanded_card = None;
        self.map_index = 0;
        self.open_map = None;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.card_index = clamp_index(self.card_index, self.view().cards.len());
        self.map_index = clamp_index(self.map_index, self.visible_maps().len());
        if self.expanded_card.is_some_and(|index| index >= self.view().cards.len()) {
            self.expanded_card = None;
        }
        if self.open_map.is_some_and(|index| index >= self.visible_maps().len()) {
            self.open_map = None;
        }
        if self.focus == Focus::Maps && self.view().maps.is_none() {
            self.focus = Focus::Cards;
        }
        self.menu_index = clamp_index(self.menu_index, self.menu().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exodo_core::CardList;

    fn fact(name: &str, category: &str) -> FactRecord {
        FactRecord::new(name, category)
    }

    fn loaded(fragment: &str) -> App {
        let mut app = App::new("fatos.html", fragment);
        app.on_load(LoadEvent::Facts(Ok(vec![
            fact("Moisés", "pessoas"),
            fact("Arão", "pessoas"),
            fact("Maná", "eventos"),
        ])));
        app.on_load(LoadEvent::Maps(Ok(vec![MapRecord::new(
            "Rota do Êxodo",
            "img/rota.png",
        )])));
        app
    }

    fn names(app: &App) -> Vec<String> {
        app.view()
            .cards
            .cards()
            .iter()
            .map(|card| card.name.clone())
            .collect()
    }

    #[test]
    fn starts_loading_with_the_initial_fragment() {
        let app = App::new("fatos.html", "categoria=pessoas&busca=moises");

        assert_eq!(app.view().cards, CardList::Loading);
        assert_eq!(app.search_input, "moises");
        assert_eq!(app.state().category, "pessoas");
    }

    #[test]
    fn initial_fragment_applies_once_facts_arrive() {
        let app = loaded("categoria=pessoas");

        assert_eq!(names(&app), ["Moisés", "Arão"]);
        assert_eq!(app.menu().get(app.menu_index).map(|e| e.key.as_str()), Some("pessoas"));
        assert_eq!(app.status_message, "3 facts, 1 maps");
    }

    #[test]
    fn typing_waits_for_the_debounce_window() {
        let mut app = loaded("");
        let start = Duration::from_secs(5);

        for (offset, ch) in "mana".chars().enumerate() {
            app.push_search_char(ch, start + Duration::from_millis(50 * offset as u64));
        }
        app.tick(start + Duration::from_millis(200));
        assert_eq!(names(&app).len(), 3);

        app.tick(start + Duration::from_millis(150 + 300));
        assert_eq!(names(&app), ["Maná"]);
        assert_eq!(app.controller.surface().fragment, "busca=mana");
    }

    #[test]
    fn enter_searches_immediately() {
        let mut app = loaded("");
        app.push_search_char('a', Duration::ZERO);
        app.push_search_char('r', Duration::ZERO);
        app.submit_search();

        assert_eq!(names(&app), ["Arão"]);
        assert!(!app.debouncer.is_pending());
    }

    #[test]
    fn selecting_a_category_rewrites_the_fragment() {
        let mut app = loaded("");
        let index = app.menu().position("eventos").unwrap();
        app.menu_index = index;
        app.select_menu_entry();

        assert_eq!(names(&app), ["Maná"]);
        assert_eq!(app.controller.surface().fragment, "categoria=eventos");
        assert_eq!(app.share_link(), "fatos.html#categoria=eventos");
    }

    #[test]
    fn address_bar_navigation_syncs_inputs() {
        let mut app = loaded("");
        app.focus = Focus::Cards;
        app.open_address_bar();
        app.address_input = "fatos.html#categoria=maps".to_string();
        app.submit_address();

        assert_eq!(app.focus, Focus::Cards);
        assert!(app.state().is_maps());
        assert_eq!(app.visible_maps().len(), 1);
        assert_eq!(app.menu().get(app.menu_index).map(|e| e.key.as_str()), Some("maps"));
        assert_eq!(app.controller.surface().fragment, "categoria=maps");
    }

    #[test]
    fn navigation_cancels_a_pending_search() {
        let mut app = loaded("");
        app.push_search_char('x', Duration::ZERO);
        app.navigate("busca=arao");
        app.tick(Duration::from_secs(10));

        assert_eq!(names(&app), ["Arão"]);
        assert_eq!(app.search_input, "arao");
    }

    #[test]
    fn one_card_expands_at_a_time() {
        let mut app = loaded("");
        app.toggle_card();
        assert_eq!(app.expanded_card, Some(0));

        app.next_card();
        app.toggle_card();
        assert_eq!(app.expanded_card, Some(1));

        app.toggle_card();
        assert_eq!(app.expanded_card, None);
    }

    #[test]
    fn map_modal_opens_and_closes() {
        let mut app = loaded("categoria=maps");
        app.open_selected_map();
        assert_eq!(app.opened_map().map(|m| m.title.as_str()), Some("Rota do Êxodo"));

        app.close_map();
        assert!(app.opened_map().is_none());
    }

    #[test]
    fn gallery_joins_the_focus_order_only_when_shown() {
        let mut app = loaded("");
        assert!(!app.focus_order().contains(&Focus::Maps));

        app.navigate("busca=rota");
        assert!(app.focus_order().contains(&Focus::Maps));

        app.focus = Focus::Maps;
        app.navigate("");
        assert_eq!(app.focus, Focus::Cards);
    }

    #[test]
    fn facts_failure_is_reported_in_the_status_line() {
        let mut app = App::new("fatos.html", "");
        app.on_load(LoadEvent::Facts(Err(CatalogError::Status {
            resource: "data.json".to_string(),
            status: "404 Not Found".to_string(),
        })));

        assert_eq!(app.status_message, "Could not load data.json");
        assert!(matches!(app.view().cards, CardList::Failed { .. }));
    }
}
