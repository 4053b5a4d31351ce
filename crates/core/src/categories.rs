use std::collections::BTreeMap;

use crate::catalog::FactRecord;
use crate::{ALL, MAPS};

/// Per-category fact counts. Keys are lower-cased before aggregation so the
/// menu agrees with the case-insensitive category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    counts: BTreeMap<String, usize>,
    total: usize,
}

/// Counts facts per category key. See [`CategoryIndex`].
pub fn build_category_counts(records: &[FactRecord]) -> CategoryIndex {
    CategoryIndex::build(records)
}

impl CategoryIndex {
    pub fn build(records: &[FactRecord]) -> Self {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.category_key()).or_insert(0) += 1;
        }

        Self {
            counts,
            total: records.len(),
        }
    }

    pub const fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Distinct category keys in ascending order.
    pub fn keys(&self) -> Vec<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    /// Facts available in `category` regardless of any query. `all` counts
    /// everything.
    pub fn count(&self, category: &str) -> usize {
        if category.eq_ignore_ascii_case(ALL) {
            return self.total;
        }
        self.counts
            .get(&category.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Menu with `all` and `maps` first, then every category in order.
    /// `map_count` is `None` until the maps resource has loaded.
    pub fn menu(&self, map_count: Option<usize>) -> CategoryMenu {
        let mut entries = Vec::with_capacity(self.counts.len() + 2);
        entries.push(MenuEntry::new(ALL, None));
        entries.push(MenuEntry::new(MAPS, map_count));
        entries.extend(
            self.counts
                .iter()
                .map(|(key, count)| MenuEntry::new(key, Some(*count))),
        );
        CategoryMenu { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Raw key, as carried in the fragment.
    pub key: String,
    pub label: String,
    pub count: Option<usize>,
}

impl MenuEntry {
    fn new(key: &str, count: Option<usize>) -> Self {
        Self {
            key: key.to_string(),
            label: label(key),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMenu {
    entries: Vec<MenuEntry>,
}

impl CategoryMenu {
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.key.eq_ignore_ascii_case(key))
    }
}

/// Display label for a category key: first letter upper-cased.
pub fn label(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(categories: &[&str]) -> Vec<FactRecord> {
        categories
            .iter()
            .map(|category| FactRecord::new("fact", category))
            .collect()
    }

    #[test]
    fn merges_case_variants() {
        let index = build_category_counts(&facts(&["a", "A", "b"]));

        assert_eq!(index.counts().get("a"), Some(&2));
        assert_eq!(index.counts().get("b"), Some(&1));
        assert_eq!(index.counts().len(), 2);
    }

    #[test]
    fn missing_category_counts_as_others() {
        let index = build_category_counts(&facts(&["", "people", ""]));
        assert_eq!(index.count("others"), 2);
    }

    #[test]
    fn keys_are_sorted() {
        let index = build_category_counts(&facts(&["places", "events", "people"]));
        assert_eq!(index.keys(), vec!["events", "people", "places"]);
    }

    #[test]
    fn menu_prepends_synthetic_entries() {
        let index = build_category_counts(&facts(&["people", "events"]));
        let menu = index.menu(None);

        assert_eq!(menu.keys(), vec!["all", "maps", "events", "people"]);
        assert_eq!(menu.get(0).map(|entry| entry.count), Some(None));
        assert_eq!(menu.get(3).map(|entry| entry.label.as_str()), Some("People"));
    }

    #[test]
    fn empty_catalog_still_has_synthetic_entries() {
        let menu = CategoryIndex::default().menu(Some(3));

        assert_eq!(menu.keys(), vec!["all", "maps"]);
        assert_eq!(menu.get(1).and_then(|entry| entry.count), Some(3));
    }

    #[test]
    fn count_handles_all_and_case() {
        let index = build_category_counts(&facts(&["People", "people", "events"]));

        assert_eq!(index.count("all"), 3);
        assert_eq!(index.count("PEOPLE"), 2);
        assert_eq!(index.count("missing"), 0);
    }

    #[test]
    fn labels_capitalize_first_letter() {
        assert_eq!(label("êxodo"), "Êxodo");
        assert_eq!(label("all"), "All");
        assert_eq!(label(""), "");
    }

    #[test]
    fn position_ignores_case() {
        let menu = build_category_counts(&facts(&["people"])).menu(None);
        assert_eq!(menu.position("People"), Some(2));
        assert_eq!(menu.position("nope"), None);
    }
}
