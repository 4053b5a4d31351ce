//! The single owner of the catalog and the view state.
//!
//! Surfaces (terminal, browser) feed events in through the transition
//! methods and receive complete [`View`]s back through [`Surface`]. Nothing
//! else mutates the state.

use tracing::{debug, error, info, warn};

use crate::catalog::{FactRecord, MapRecord};
use crate::categories::{CategoryIndex, CategoryMenu};
use crate::error::CatalogError;
use crate::filter::{filter_by_category, filter_by_term, filter_maps_by_term};
use crate::fragment::{decode_state, ViewState};
use crate::view::{CardList, View};
use crate::{ALL, MAPS};

/// Presentation hooks. Only `render` is required; a surface without a menu
/// or an address bar keeps the default no-ops.
pub trait Surface {
    /// Replace everything on screen with `view`.
    fn render(&mut self, view: &View);

    /// Rewrite the address-bar fragment in place, without a history entry.
    fn replace_fragment(&mut self, _fragment: &str) {}

    fn populate_menu(&mut self, _menu: &CategoryMenu) {}

    /// Called once when a resource fails to load; `fatal` is true for the
    /// facts resource.
    fn report_load_error(&mut self, _error: &CatalogError, _fatal: bool) {}
}

#[derive(Debug)]
enum Facts {
    Loading,
    Ready(Vec<FactRecord>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Typed query, category pick: the fragment follows the state.
    User,
    /// Loads and fragment navigation: the fragment already says it.
    External,
}

#[derive(Debug)]
pub struct Controller<S> {
    facts: Facts,
    maps: Option<Vec<MapRecord>>,
    index: CategoryIndex,
    state: ViewState,
    surface: S,
}

impl<S: Surface> Controller<S> {
    pub fn new(surface: S) -> Self {
        Self {
            facts: Facts::Loading,
            maps: None,
            index: CategoryIndex::default(),
            state: ViewState::default(),
            surface,
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn facts(&self) -> &[FactRecord] {
        match &self.facts {
            Facts::Ready(facts) => facts,
            Facts::Loading | Facts::Failed(_) => &[],
        }
    }

    pub fn maps(&self) -> &[MapRecord] {
        self.maps.as_deref().unwrap_or(&[])
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.facts, Facts::Loading)
    }

    pub const fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn menu(&self) -> CategoryMenu {
        self.index.menu(self.maps.as_ref().map(Vec::len))
    }

    /// Installs the facts, builds the category index and renders whatever
    /// state the fragment already selected.
    pub fn facts_loaded(&mut self, result: Result<Vec<FactRecord>, CatalogError>) {
        match result {
            Ok(facts) => {
                info!(count = facts.len(), "facts loaded");
                self.index = CategoryIndex::build(&facts);
                self.facts = Facts::Ready(facts);
                let menu = self.menu();
                self.surface.populate_menu(&menu);
            }
            Err(err) => {
                error!(error = %err, "failed to load facts");
                self.surface.report_load_error(&err, true);
                self.facts = Facts::Failed(err.to_string());
            }
        }
        self.refresh(Origin::External);
    }

    /// Maps are optional: a failure is logged and treated as an empty set.
    pub fn maps_loaded(&mut self, result: Result<Vec<MapRecord>, CatalogError>) {
        let maps = match result {
            Ok(maps) => {
                info!(count = maps.len(), "maps loaded");
                maps
            }
            Err(err) => {
                warn!(error = %err, "no maps available");
                self.surface.report_load_error(&err, false);
                Vec::new()
            }
        };
        self.maps = Some(maps);

        if matches!(self.facts, Facts::Ready(_)) {
            let menu = self.menu();
            self.surface.populate_menu(&menu);
        }
        self.refresh(Origin::External);
    }

    /// Applies a fragment that changed outside the controller (initial
    /// address, back/forward, a followed link).
    pub fn navigate(&mut self, fragment: &str) {
        let decoded = decode_state(fragment);
        let category = canonical_category(&decoded.category);
        self.state = ViewState::new(&category, decoded.query.trim());
        debug!(fragment, "navigated");
        self.refresh(Origin::External);
    }

    pub fn select_category(&mut self, category: &str) {
        self.state.category = canonical_category(category);
        self.refresh(Origin::User);
    }

    pub fn search(&mut self, query: &str) {
        self.state.query = query.trim().to_string();
        self.refresh(Origin::User);
    }

    /// Term filter, then category filter, over the whole catalog.
    pub fn visible_facts(&self) -> Vec<&FactRecord> {
        filter_by_category(
            filter_by_term(self.facts(), &self.state.query),
            &self.state.category,
        )
    }

    /// Matching maps for a query that hits any, even under the `maps`
    /// category. Otherwise every map for `maps`, and no gallery elsewhere.
    pub fn visible_maps(&self) -> Option<Vec<&MapRecord>> {
        let matching = filter_maps_by_term(self.maps(), &self.state.query);
        if !matching.is_empty() {
            return Some(matching);
        }
        self.state.is_maps().then(|| self.maps().iter().collect())
    }

    pub fn view(&self) -> View {
        let visible = self.visible_facts();
        let maps = self
            .visible_maps()
            .map(|maps| maps.into_iter().cloned().collect());

        let (cards, badge) = match &self.facts {
            Facts::Loading => (CardList::Loading, None),
            Facts::Failed(message) => (
                CardList::Failed {
                    message: message.clone(),
                },
                None,
            ),
            Facts::Ready(_) => {
                let total = self.index.count(&self.state.category);
                let badge = View::badge_for(&self.state, total, visible.len());
                (CardList::build(&visible, &self.state.query), Some(badge))
            }
        };

        View {
            state: self.state.clone(),
            cards,
            maps,
            badge,
        }
    }

    fn refresh(&mut self, origin: Origin) {
        let view = self.view();
        debug!(
            category = %self.state.category,
            query = %self.state.query,
            showing = view.cards.len(),
            "recomputed view"
        );
        self.surface.render(&view);

        if origin == Origin::User {
            self.surface.replace_fragment(&self.state.fragment());
        }
    }
}

/// Trims the key; the synthetic `all` and `maps` keys are stored lowercase
/// and an empty key means `all`.
fn canonical_category(category: &str) -> String {
    let category = category.trim();
    if category.is_empty() || category.eq_ignore_ascii_case(ALL) {
        ALL.to_string()
    } else if category.eq_ignore_ascii_case(MAPS) {
        MAPS.to_string()
    } else {
        category.to_string()
    }
}
