//! Text processing utilities for tokenization and term counting

use std::collections::BTreeMap;

/// Tokens of this many characters or fewer are dropped
const MIN_TOKEN_CHARS: usize = 2;

/// Normalize free text into an ordered token sequence
///
/// Lower-cases the input, strips every character that is neither alphanumeric
/// nor whitespace, splits on whitespace runs and drops tokens of two characters
/// or fewer. Repeated tokens are kept so term frequencies can be counted.
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|s| s.chars().count() > MIN_TOKEN_CHARS)
        .map(|s| s.to_string())
        .collect()
}

/// Normalize optional text, treating a missing value as the empty string
pub fn normalize_opt(text: Option<&str>) -> Vec<String> {
    normalize(text.unwrap_or_default())
}

/// Count raw occurrences of each token
///
/// Ordered by term so that anything summed over the counts is reproducible.
pub fn term_frequencies(tokens: &[String]) -> BTreeMap<String, f64> {
    let mut freqs = BTreeMap::new();
    for token in tokens {
        *freqs.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    freqs
}
