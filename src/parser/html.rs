//! Article body extraction
//!
//! Each extractor returns `None` when the body element is absent; the crawl
//! loop turns that into a soft skip.

use scraper::Html;

use crate::parser::selectors::{RiaSelectors, TassSelectors};

/// "Read also" teaser block that TASS inlines into article bodies
const TASS_READ_ALSO: &str = "Читайте также";

/// Extract article text from a TASS article page
///
/// All text nodes under `<article>` are joined with single spaces, except
/// nodes consisting of the read-also teaser label.
pub fn extract_tass_body(html: &str, selectors: &TassSelectors) -> Option<String> {
    let document = Html::parse_document(html);
    let article = document.select(&selectors.article).next()?;

    let text = article
        .text()
        .filter(|node| *node != TASS_READ_ALSO)
        .collect::<Vec<_>>()
        .join(" ");

    Some(text.to_lowercase())
}

/// Extract article text from a RIA Novosti article page
pub fn extract_ria_body(html: &str, selectors: &RiaSelectors) -> Option<String> {
    let document = Html::parse_document(html);
    let body = document.select(&selectors.article_body).next()?;

    Some(body.text().collect::<String>().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tass_body_drops_read_also() {
        let html = r#"<html><body><article>
            <p>Лесные пожары в Якутии</p><div>Читайте также</div><p>Природа страдает</p>
            </article></body></html>"#;
        let text = extract_tass_body(html, &TassSelectors::new()).unwrap();
        assert!(text.contains("лесные пожары в якутии"));
        assert!(text.contains("природа страдает"));
        assert!(!text.contains("читайте также"));
    }

    #[test]
    fn test_tass_body_missing_article() {
        let html = "<html><body><div>Нет статьи</div></body></html>";
        assert!(extract_tass_body(html, &TassSelectors::new()).is_none());
    }

    #[test]
    fn test_ria_body_lowercased() {
        let html = r#"<div class="article__body js-mediator-article mia-analytics">
            <p>МОСКВА, 24 апр - РИА Новости.</p><p>Экология Байкала</p></div>"#;
        let text = extract_ria_body(html, &RiaSelectors::new()).unwrap();
        assert!(text.contains("экология байкала"));
        assert!(text.contains("москва"));
    }

    #[test]
    fn test_ria_body_missing() {
        let html = r#"<div class="article__text">Текст</div>"#;
        assert!(extract_ria_body(html, &RiaSelectors::new()).is_none());
    }
}
