use crate::catalog::{FactRecord, MapRecord};
use crate::normalize::normalize;
use crate::ALL;

/// Records that can be matched against a free-text query.
pub trait Searchable {
    /// Fields searched by the term filter, in display order.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Non-empty searchable fields joined by a single space.
    fn search_text(&self) -> String {
        self.searchable_fields()
            .into_iter()
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `normalized_term` must already be normalized.
    fn matches_normalized(&self, normalized_term: &str) -> bool {
        normalize(&self.search_text()).contains(normalized_term)
    }
}

impl Searchable for FactRecord {
    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.meaning.as_str(),
            self.reference.as_str(),
            self.description.as_str(),
        ]
    }
}

impl Searchable for MapRecord {
    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.file.as_str()]
    }
}

/// Keeps the records whose searchable text contains `term`, ignoring case
/// and accents. An empty term keeps everything.
pub fn filter_by_term<'a, R: Searchable>(records: &'a [R], term: &str) -> Vec<&'a R> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let normalized_term = normalize(term);
    records
        .iter()
        .filter(|record| record.matches_normalized(&normalized_term))
        .collect()
}

/// Narrows an already term-filtered list to one category. `all` keeps
/// everything; other keys compare case-insensitively and exactly.
pub fn filter_by_category<'a>(
    records: Vec<&'a FactRecord>,
    category: &str,
) -> Vec<&'a FactRecord> {
    let wanted = category.trim().to_lowercase();
    if wanted == ALL {
        return records;
    }

    records
        .into_iter()
        .filter(|record| record.category_key() == wanted)
        .collect()
}

/// Maps only show up for an actual query: an empty term matches nothing.
pub fn filter_maps_by_term<'a>(maps: &'a [MapRecord], term: &str) -> Vec<&'a MapRecord> {
    if term.is_empty() {
        return Vec::new();
    }
    filter_by_term(maps, term)
}
