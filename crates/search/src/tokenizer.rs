//! Term extraction
//!
//! The same functions run at index time and at query time, so the terms a
//! query asks for are spelled exactly like the terms postings were written
//! under.
//!
//! Pipeline:
//! - Lowercase
//! - Split on whitespace and `. , ! ? ; : ( ) " '`
//! - Drop tokens of two characters or fewer
//!
//! There is no stemming and no stopword list.

use std::collections::BTreeSet;

/// Tokens of this many characters or fewer are discarded
pub const MAX_DISCARDED_LEN: usize = 2;

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '(' | ')' | '"' | '\'')
}

/// Tokenize text into terms, keeping order and duplicates
///
/// Used for term-frequency counting during scoring.
///
/// # Example
///
/// ```
/// use dirsearch_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Boots, boots; BOOTS!");
/// assert_eq!(tokens, vec!["boots", "boots", "boots"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .filter(|s| s.chars().count() > MAX_DISCARDED_LEN)
        .map(String::from)
        .collect()
}

/// Extract the deduplicated term set of one or more text fields
///
/// # Example
///
/// ```
/// use dirsearch_search::tokenizer::extract_terms;
///
/// let terms = extract_terms(&["Red Hiking Boots", "hiking (trail) boots"]);
/// let terms: Vec<_> = terms.into_iter().collect();
/// assert_eq!(terms, vec!["boots", "hiking", "red", "trail"]);
/// ```
pub fn extract_terms<T: AsRef<str>>(fields: &[T]) -> BTreeSet<String> {
    fields
        .iter()
        .flat_map(|f| tokenize(f.as_ref()))
        .collect()
}
