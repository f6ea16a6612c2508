//! Russian Snowball stemming for keywords and article tokens
//!
//! Both sides of a keyword match go through [`RussianStemmer::stem_token`],
//! so keyword phrases and article tokens are always reduced the same way.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

use crate::classify::keywords::{russian_stopwords, KeywordSet};
use crate::classify::tokenizer::{tokenize, tokenize_filtered};

/// Whether stopwords are dropped before stemming
///
/// The crawl-time classifier keeps every token, the offline classifier drops
/// stopwords first. Both behaviours are kept as named variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwordPolicy {
    Keep,
    Filter,
}

/// Snowball stemmer for Russian
pub struct RussianStemmer {
    inner: Stemmer,
}

impl RussianStemmer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::Russian),
        }
    }

    /// Stem a single token to its fixed point
    ///
    /// Snowball can strip a further suffix from an already stemmed word, so
    /// the token is re-stemmed until it stops changing. This makes stemming
    /// idempotent, but a token can end up shorter than a single Snowball pass
    /// would leave it. Keywords and article tokens both go through this, so
    /// matches stay symmetric; recall can still differ slightly from datasets
    /// collected with single-pass stemming.
    pub fn stem_token(&self, token: &str) -> String {
        let mut current = token.to_lowercase();
        // Every productive pass shortens the token, so this bound is never the exit
        let max_passes = current.chars().count() + 2;
        for _ in 0..max_passes {
            let next = self.inner.stem(&current).into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Tokenize and stem a whole text
    pub fn stem_text(&self, text: &str, policy: StopwordPolicy) -> Vec<String> {
        let tokens = match policy {
            StopwordPolicy::Keep => tokenize(text),
            StopwordPolicy::Filter => tokenize_filtered(text, russian_stopwords()),
        };
        tokens.iter().map(|t| self.stem_token(t)).collect()
    }

    /// Tokenize and stem a whole text into a lookup set
    pub fn stem_text_set(&self, text: &str, policy: StopwordPolicy) -> HashSet<String> {
        self.stem_text(text, policy).into_iter().collect()
    }
}

impl Default for RussianStemmer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stemmed phrases grouped by category, in the order of the source set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemmedKeywords {
    categories: Vec<(String, Vec<String>)>,
}

impl StemmedKeywords {
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, phrases)| (name.as_str(), phrases.as_slice()))
    }

    /// All stemmed phrases regardless of category
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|(_, phrases)| phrases.iter().map(String::as_str))
    }
}

/// Normalizes keyword phrases into stemmed token sequences
pub struct KeywordStemmer {
    stemmer: RussianStemmer,
}

impl KeywordStemmer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stemmer: RussianStemmer::new(),
        }
    }

    /// Stem each phrase token by token and rejoin with single spaces
    ///
    /// Output order matches input order. A phrase made only of stopwords
    /// becomes an empty string under [`StopwordPolicy::Filter`].
    pub fn stem_phrases<S: AsRef<str>>(&self, phrases: &[S], policy: StopwordPolicy) -> Vec<String> {
        phrases
            .iter()
            .map(|phrase| self.stemmer.stem_text(phrase.as_ref(), policy).join(" "))
            .collect()
    }

    /// Stem every category of a keyword set
    pub fn stem_keyword_set(&self, set: &KeywordSet, policy: StopwordPolicy) -> StemmedKeywords {
        StemmedKeywords {
            categories: set
                .categories()
                .map(|(name, phrases)| (name.to_string(), self.stem_phrases(phrases, policy)))
                .collect(),
        }
    }

    pub fn into_stemmer(self) -> RussianStemmer {
        self.stemmer
    }
}

impl Default for KeywordStemmer {
    fn default() -> Self {
        Self::new()
    }
}
