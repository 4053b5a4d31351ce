//! Property tests for the filter and fragment laws.
//!
//! Covers: normalizer idempotence, term-filter identity and ordering,
//! category composition and fragment round-trips.

use exodo_core::{
    decode_state, encode_state, filter_by_category, filter_by_term, normalize, FactRecord,
    ViewState,
};
use proptest::prelude::*;

fn fact_strategy() -> impl Strategy<Value = FactRecord> {
    (
        "[a-zA-Zçãéêíóú ]{0,12}",
        "[a-zA-Zçãéêíóú ]{0,12}",
        "[a-zA-Z0-9: ]{0,8}",
        "[a-zA-Zçãéêíóú ]{0,24}",
        prop_oneof![Just(""), Just("people"), Just("People"), Just("events"), Just("places")],
    )
        .prop_map(|(name, meaning, reference, description, category)| FactRecord {
            name,
            meaning,
            reference,
            description,
            category: category.to_string(),
        })
}

// ===========================================================================
// Normalizer
// ===========================================================================

proptest! {
    #[test]
    fn normalize_is_idempotent(text in any::<String>()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_ignores_case_of_ascii(text in "[a-zA-Z ]{0,32}") {
        prop_assert_eq!(normalize(&text), text.to_lowercase());
    }
}

// ===========================================================================
// Term and category filters
// ===========================================================================

proptest! {
    #[test]
    fn empty_term_returns_every_record(facts in prop::collection::vec(fact_strategy(), 0..20)) {
        let filtered = filter_by_term(&facts, "");
        prop_assert_eq!(filtered.len(), facts.len());
        for (kept, original) in filtered.iter().zip(&facts) {
            prop_assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn term_filter_is_an_ordered_subsequence(
        facts in prop::collection::vec(fact_strategy(), 0..20),
        term in "[a-zçã ]{0,3}",
    ) {
        let filtered = filter_by_term(&facts, &term);
        let positions = filtered.iter().map(|kept| {
            facts.iter().position(|original| std::ptr::eq(*kept, original))
        });

        let mut last = None;
        for position in positions {
            prop_assert!(position.is_some(), "filtered record not in input");
            prop_assert!(last < position, "order not preserved");
            last = position;
        }
    }

    #[test]
    fn rendered_set_matches_definition(
        facts in prop::collection::vec(fact_strategy(), 0..20),
        term in "[a-z]{0,2}",
        category in prop_oneof![Just("all"), Just("people"), Just("others"), Just("events")],
    ) {
        let visible = filter_by_category(filter_by_term(&facts, &term), category);
        let needle = normalize(&term);

        let expected: Vec<&FactRecord> = facts
            .iter()
            .filter(|fact| {
                let text = [&fact.name, &fact.meaning, &fact.reference, &fact.description]
                    .iter()
                    .filter(|field| !field.is_empty())
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                term.is_empty() || normalize(&text).contains(&needle)
            })
            .filter(|fact| category == "all" || fact.category_key() == category)
            .collect();

        prop_assert_eq!(visible, expected);
    }
}

// ===========================================================================
// Fragment round-trips
// ===========================================================================

proptest! {
    #[test]
    fn fragment_round_trips(
        category in prop_oneof![Just("all".to_string()), "[a-zçã]{1,10}( [a-z]{1,5})?"],
        query in any::<String>(),
    ) {
        let encoded = encode_state(&category, &query);
        prop_assert_eq!(decode_state(&encoded), ViewState::new(&category, &query));
        prop_assert_eq!(decode_state(&format!("#{encoded}")), ViewState::new(&category, &query));
    }

    #[test]
    fn decoding_never_panics(fragment in any::<String>()) {
        let state = decode_state(&fragment);
        prop_assert!(!state.category.is_empty());
    }
}

#[test]
fn spec_examples() {
    assert_eq!(encode_state("all", ""), "");
    assert_eq!(encode_state("maps", "moses"), "categoria=maps&busca=moses");
    assert_eq!(decode_state("categoria=maps"), ViewState::new("maps", ""));
}

#[test]
fn end_to_end_category_filter() {
    let facts = vec![
        FactRecord::new("Noah", "people"),
        FactRecord::new("Flood", "events"),
    ];
    let visible = filter_by_category(filter_by_term(&facts, ""), "people");

    assert_eq!(visible, vec![&facts[0]]);
}
