//! CSS selectors for TASS and RIA Novosti pages
//!
//! Selectors are parsed once and shared by every parser instance.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // RIA listing page ("more.html" fragment)
    static ref RIA_LIST_ITEM: Selector = parse_selector!("div.list-item");
    static ref RIA_ITEM_LINK: Selector = parse_selector!("a[href]");
    static ref RIA_ITEM_DATE: Selector = parse_selector!("div.list-item__date");

    // RIA article page
    static ref RIA_ARTICLE_BODY: Selector =
        parse_selector!("div.article__body.js-mediator-article.mia-analytics");

    // TASS article page
    static ref TASS_ARTICLE: Selector = parse_selector!("article");
}

/// Selectors for RIA Novosti listing and article pages
#[derive(Clone)]
pub struct RiaSelectors {
    pub list_item: Selector,
    pub item_link: Selector,
    pub item_date: Selector,
    pub article_body: Selector,
}

impl RiaSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list_item: RIA_LIST_ITEM.clone(),
            item_link: RIA_ITEM_LINK.clone(),
            item_date: RIA_ITEM_DATE.clone(),
            article_body: RIA_ARTICLE_BODY.clone(),
        }
    }
}

impl Default for RiaSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for TASS article pages
#[derive(Clone)]
pub struct TassSelectors {
    pub article: Selector,
}

impl TassSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            article: TASS_ARTICLE.clone(),
        }
    }
}

impl Default for TassSelectors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_ria_selectors_match_list_markup() {
        let html = Html::parse_fragment(
            r#"<div class="list-item"><a href="https://ria.ru/20220424/x-1.html">x</a>
               <div class="list-item__date">24 апреля 2022, 23:59</div></div>"#,
        );
        let selectors = RiaSelectors::new();
        let item = html.select(&selectors.list_item).next().unwrap();
        assert!(item.select(&selectors.item_link).next().is_some());
        assert!(item.select(&selectors.item_date).next().is_some());
    }

    #[test]
    fn test_ria_body_requires_all_classes() {
        let html = Html::parse_document(r#"<div class="article__body">partial</div>"#);
        let selectors = RiaSelectors::new();
        assert!(html.select(&selectors.article_body).next().is_none());
    }

    #[test]
    fn test_tass_article_selector() {
        let html = Html::parse_document("<html><body><article><p>текст</p></article></body></html>");
        assert!(html.select(&TassSelectors::new().article).next().is_some());
    }
}
