//! Keyword-stemming article classification
//!
//! Two classifiers share one primitive: a stemmed keyword phrase matches when
//! it is *equal* to one stemmed token of the article. A multi-word phrase
//! contains a space and therefore never equals a single token; this narrow
//! policy is kept as-is because already collected datasets were built with it.
//!
//! - [`KeywordClassifier`] - binary match used while crawling, no stopword filtering
//! - [`CategoryClassifier`] - first matching category, stopwords filtered first

pub mod formatter;
pub mod keywords;
pub mod stemmer;
pub mod tokenizer;

pub use keywords::{KeywordSet, NO_CATEGORY};
pub use stemmer::{KeywordStemmer, RussianStemmer, StemmedKeywords, StopwordPolicy};

/// Binary environment classifier used at crawl time
///
/// Keyword phrases are stemmed once on construction and reused for every
/// article of the run.
pub struct KeywordClassifier {
    stemmer: RussianStemmer,
    keywords: StemmedKeywords,
}

impl KeywordClassifier {
    pub fn new(set: &KeywordSet) -> Self {
        let keyword_stemmer = KeywordStemmer::new();
        let keywords = keyword_stemmer.stem_keyword_set(set, StopwordPolicy::Keep);
        Self {
            stemmer: keyword_stemmer.into_stemmer(),
            keywords,
        }
    }

    /// Classifier over the built-in environment keyword list
    pub fn environment() -> Self {
        Self::new(&KeywordSet::environment())
    }

    /// True iff some stemmed keyword phrase equals some stemmed article token
    pub fn matches(&self, text: &str) -> bool {
        let tokens = self.stemmer.stem_text_set(text, StopwordPolicy::Keep);
        self.keywords.phrases().any(|phrase| tokens.contains(phrase))
    }

    pub fn keywords(&self) -> &StemmedKeywords {
        &self.keywords
    }
}

/// Category classifier used for offline re-classification
pub struct CategoryClassifier {
    stemmer: RussianStemmer,
    keywords: StemmedKeywords,
}

impl CategoryClassifier {
    pub fn new(set: &KeywordSet) -> Self {
        let keyword_stemmer = KeywordStemmer::new();
        let keywords = keyword_stemmer.stem_keyword_set(set, StopwordPolicy::Filter);
        Self {
            stemmer: keyword_stemmer.into_stemmer(),
            keywords,
        }
    }

    /// Classifier over the built-in category keyword list
    pub fn categorized() -> Self {
        Self::new(&KeywordSet::categorized())
    }

    /// First category (in declaration order) with a matching phrase
    pub fn categorize(&self, text: &str) -> Option<&str> {
        let tokens = self.stemmer.stem_text_set(text, StopwordPolicy::Filter);
        self.keywords
            .categories()
            .find(|(_, phrases)| phrases.iter().any(|phrase| tokens.contains(phrase)))
            .map(|(name, _)| name)
    }

    /// Like [`Self::categorize`], with [`NO_CATEGORY`] when nothing matches
    pub fn category_label(&self, text: &str) -> &str {
        self.categorize(text).unwrap_or(NO_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_token_match() {
        let classifier = KeywordClassifier::environment();
        assert!(classifier.matches("в регионе обсудили вопросы, которые касаются экология города"));
    }

    #[test]
    fn test_match_ignores_case() {
        let classifier = KeywordClassifier::environment();
        assert!(classifier.matches("Это настоящая ПРИРОДА Сибири"));
    }

    #[test]
    fn test_multi_word_phrase_never_matches() {
        let classifier = KeywordClassifier::environment();
        assert!(!classifier.matches("окружающая среда и устойчивое развитие"));
    }

    #[test]
    fn test_unrelated_text_does_not_match() {
        let classifier = KeywordClassifier::environment();
        assert!(!classifier.matches("центральный банк сохранил ключевую ставку"));
    }

    #[test]
    fn test_first_category_wins() {
        let set = KeywordSet::from_categories(&[
            ("Первая", &["Климат"]),
            ("Вторая", &["Климат", "Выбросы"]),
        ]);
        let classifier = CategoryClassifier::new(&set);
        assert_eq!(classifier.categorize("климат меняется"), Some("Первая"));
        assert_eq!(classifier.categorize("выбросы растут"), Some("Вторая"));
    }

    #[test]
    fn test_no_category_label() {
        let classifier = CategoryClassifier::categorized();
        assert_eq!(classifier.categorize("футбольный матч"), None);
        assert_eq!(classifier.category_label("футбольный матч"), NO_CATEGORY);
    }
}
