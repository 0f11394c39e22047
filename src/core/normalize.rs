use crate::core::types::SearchInput;

/// Case-fold a string into characters.
///
/// Each character is lower-cased independently, so the mapping never depends on
/// neighbouring characters. Whitespace and punctuation pass through untouched.
#[must_use]
pub fn fold_case(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Normalize a text/pattern pair before matching
#[must_use]
pub fn normalize(text: &str, pattern: &str) -> SearchInput {
    SearchInput {
        text: fold_case(text),
        pattern: fold_case(pattern),
    }
}
