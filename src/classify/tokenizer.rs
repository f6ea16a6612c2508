//! Word tokenization for Russian text
//!
//! Splits on Unicode word boundaries (UAX#29) and lower-cases every token.
//! Punctuation never forms a token.

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Split text into lower-cased word tokens
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

/// Split text into lower-cased word tokens, dropping stopwords
#[must_use]
pub fn tokenize_filtered(text: &str, stopwords: &HashSet<&str>) -> Vec<String> {
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|token| !stopwords.contains(token.as_str()))
        .collect()
}
