use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds case and accents so "Café" and "cafe" compare equal.
///
/// Lower-cases first, then decomposes (NFD) and drops combining marks.
/// Lower-casing before decomposition keeps the function idempotent: some
/// characters (`İ`) only grow a combining mark when lower-cased.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("ÊXODO"), "exodo");
        assert_eq!(normalize("Referência à Gênesis"), "referencia a genesis");
    }

    #[test]
    fn precomposed_and_decomposed_forms_agree() {
        assert_eq!(normalize("\u{e9}"), normalize("e\u{301}"));
    }

    #[test]
    fn dotted_capital_i_is_stable() {
        let once = normalize("İsaque");
        assert_eq!(normalize(&once), once);
        assert_eq!(once, "isaque");
    }

    #[test]
    fn leaves_unaccented_text_alone() {
        assert_eq!(normalize("noah 7:12"), "noah 7:12");
    }
}
