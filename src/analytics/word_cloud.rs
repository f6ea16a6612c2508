//! Word frequency counting and SVG word cloud rendering
//!
//! This module provides functionality for:
//! - Counting words across a column of article texts
//! - Dropping stopwords, digits, punctuation and short words
//! - Laying out the most frequent words as a static SVG "bubble" picture

use handlebars::Handlebars;
use serde::Serialize;
use std::collections::HashMap;

use crate::classify::formatter::remove_punctuation_digits;
use crate::classify::keywords::{bubble_stopwords, russian_stopwords};
use crate::classify::tokenizer::tokenize;

pub use handlebars::RenderError;

/// Words shorter than this many characters are not counted
pub const MIN_WORD_LENGTH: usize = 3;

/// SVG template for the word cloud
const WORD_CLOUD_TEMPLATE: &str = include_str!("../../templates/word_cloud.hbs");

/// Fill colours cycled over the placed words
const PALETTE: &[&str] = &[
    "#1b5e20", "#2e7d32", "#00695c", "#0277bd", "#558b2f", "#33691e", "#004d40", "#37474f",
];

/// Approximate glyph width relative to the font size
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Word counts over a set of texts
#[derive(Debug, Clone, Default)]
pub struct WordFrequencies {
    counts: HashMap<String, usize>,
}

impl WordFrequencies {
    /// Count words over all texts
    ///
    /// Punctuation and digits are stripped first, then Russian stopwords,
    /// the extra bubble stopwords and words shorter than
    /// [`MIN_WORD_LENGTH`] are dropped.
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = HashMap::new();
        let stopwords = russian_stopwords();
        let extra = bubble_stopwords();

        for text in texts {
            let cleaned = remove_punctuation_digits(text);
            for word in tokenize(&cleaned) {
                if word.chars().count() < MIN_WORD_LENGTH
                    || stopwords.contains(word.as_str())
                    || extra.contains(word.as_str())
                {
                    continue;
                }
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted words
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The `n` most frequent words, ties broken alphabetically
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }
}

/// Canvas and font settings of the rendered cloud
#[derive(Debug, Clone, Copy)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub background: &'static str,
}

impl Default for CloudLayout {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            min_font_size: 8,
            max_font_size: 64,
            background: "white",
        }
    }
}

#[derive(Debug, Serialize)]
struct PlacedWord {
    text: String,
    x: u32,
    y: u32,
    size: u32,
    color: &'static str,
}

#[derive(Debug, Serialize)]
struct CloudData {
    width: u32,
    height: u32,
    background: &'static str,
    words: Vec<PlacedWord>,
}

/// Font size scaled linearly between the layout's bounds
fn font_size(count: usize, max_count: usize, layout: &CloudLayout) -> u32 {
    if max_count == 0 {
        return layout.min_font_size;
    }
    let span = f64::from(layout.max_font_size.saturating_sub(layout.min_font_size));
    let scaled = span * count as f64 / max_count as f64;
    layout.min_font_size + scaled.round() as u32
}

/// Place words left to right in rows, largest first
///
/// Words that do not fit the canvas are left out.
fn place_words(words: &[(&str, usize)], layout: &CloudLayout) -> Vec<PlacedWord> {
    let max_count = words.first().map(|(_, c)| *c).unwrap_or(0);
    let mut placed = Vec::with_capacity(words.len());

    let mut x = 0u32;
    let mut baseline = 0u32;
    let mut row_height = 0u32;

    for (index, (word, count)) in words.iter().enumerate() {
        let size = font_size(*count, max_count, layout);
        let width =
            (word.chars().count() as f64 * f64::from(size) * GLYPH_WIDTH_RATIO).ceil() as u32;

        if width > layout.width {
            continue;
        }

        if x + width > layout.width || row_height == 0 {
            baseline += if row_height == 0 { size } else { row_height };
            x = 0;
            row_height = size;
        }

        if baseline > layout.height {
            break;
        }

        placed.push(PlacedWord {
            text: (*word).to_string(),
            x,
            y: baseline,
            size,
            color: PALETTE[index % PALETTE.len()],
        });

        x += width + size / 2;
    }

    placed
}

/// Render the given words as an SVG document
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render
pub fn render_svg(words: &[(&str, usize)], layout: &CloudLayout) -> Result<String, RenderError> {
    let data = CloudData {
        width: layout.width,
        height: layout.height,
        background: layout.background,
        words: place_words(words, layout),
    };

    Handlebars::new().render_template(WORD_CLOUD_TEMPLATE, &data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_skip_stopwords_and_short_words() {
        let freq = WordFrequencies::from_texts([
            "Экология и природа, экология 2022!",
            "природа не ждёт: лес, лес",
        ]);
        assert_eq!(freq.get("экология"), 2);
        assert_eq!(freq.get("природа"), 2);
        assert_eq!(freq.get("лес"), 2);
        assert_eq!(freq.get("и"), 0);
        assert_eq!(freq.get("не"), 0);
        assert_eq!(freq.get("2022"), 0);
    }

    #[test]
    fn test_top_orders_by_count_then_word() {
        let freq = WordFrequencies::from_texts(["вода вода вода лес лес берег"]);
        let top = freq.top(2);
        assert_eq!(top, vec![("вода", 3), ("лес", 2)]);
        assert_eq!(freq.total(), 6);
        assert_eq!(freq.len(), 3);
    }

    #[test]
    fn test_font_size_bounds() {
        let layout = CloudLayout::default();
        assert_eq!(font_size(10, 10, &layout), layout.max_font_size);
        assert_eq!(font_size(0, 10, &layout), layout.min_font_size);
        assert_eq!(font_size(0, 0, &layout), layout.min_font_size);
    }

    #[test]
    fn test_render_svg() {
        let svg = render_svg(&[("экология", 5), ("лес", 2)], &CloudLayout::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("экология"));
        assert!(svg.contains("лес"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_svg_escapes_text() {
        let svg = render_svg(&[("a<b", 1)], &CloudLayout::default()).unwrap();
        assert!(svg.contains("a&lt;b"));
    }

    #[test]
    fn test_words_stay_inside_canvas() {
        let words: Vec<(&str, usize)> = (0..200).map(|_| ("растительность", 1)).collect();
        let layout = CloudLayout::default();
        for word in place_words(&words, &layout) {
            assert!(word.y <= layout.height);
            assert!(word.x < layout.width);
        }
    }
}
