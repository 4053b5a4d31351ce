// Export our modules for use in the terminal and web apps
pub mod catalog;
pub mod categories;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod html;
pub mod normalize;
pub mod view;

pub use catalog::{parse_facts, parse_maps, FactRecord, MapRecord};
pub use categories::{build_category_counts, CategoryIndex, CategoryMenu, MenuEntry};
pub use controller::{Controller, Surface};
pub use debounce::{CancelToken, Debouncer, SEARCH_DEBOUNCE};
pub use error::CatalogError;
pub use filter::{filter_by_category, filter_by_term, filter_maps_by_term, Searchable};
pub use fragment::{decode_state, encode_state, link, ViewState};
pub use normalize::normalize;
pub use view::{Badge, Card, CardList, View};

/// Synthetic category that disables category filtering.
pub const ALL: &str = "all";

/// Synthetic category that opens the map gallery.
pub const MAPS: &str = "maps";

/// Category assigned to facts that carry none.
pub const OTHERS: &str = "others";
