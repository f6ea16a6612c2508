//! RIA Novosti source: HTML "more" listing fragments, article body div

use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::crawler::{
    ArticleBody, Cursor, ListingPage, NewsFetcher, NewsSource, SkipReason, SparsePage,
};
use crate::models::{ListingItem, Source};
use crate::parser::{
    extract_ria_body, parse_ria_date, parse_ria_listing, ria_article_id, RawListItem,
    RiaSelectors,
};
use crate::utils::error::CrawlerError;

/// Page position whose article id continues the listing
pub const CONTINUATION_ITEM_INDEX: usize = 19;

/// Pages with fewer entries are treated as a transient gap
pub const MIN_PAGE_ITEMS: usize = 2;

pub struct RiaSource {
    fetcher: NewsFetcher,
    site_base: String,
    selectors: RiaSelectors,
}

impl RiaSource {
    pub fn new(fetcher: NewsFetcher, settings: &SourceConfig) -> Self {
        Self {
            fetcher,
            site_base: settings.site_base.trim_end_matches('/').to_string(),
            selectors: RiaSelectors::new(),
        }
    }

    /// Listing fragment URL for the cursor's timestamp and continuation id
    pub fn listing_url(&self, cursor: &Cursor) -> String {
        let ts = cursor.timestamp();
        format!(
            "{}/services/{}/more.html?id={}&date={}",
            self.site_base,
            ts.format("%Y%m%d"),
            cursor.continuation(),
            ts.format("%Y%m%dT%H%M%S")
        )
    }

    /// Listing links are absolute; relative ones are resolved against the site
    pub fn article_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{href}", self.site_base)
        }
    }
}

fn raw_to_item(raw: &RawListItem) -> Result<ListingItem, SkipReason> {
    let href = raw.href.as_deref().ok_or(SkipReason::MalformedHref)?;
    let id = ria_article_id(href).ok_or(SkipReason::MalformedHref)?;

    let published_at = raw
        .date_text
        .as_deref()
        .and_then(parse_ria_date)
        .ok_or(SkipReason::UnparseableDate)?;

    Ok(ListingItem {
        id,
        published_at,
        location: href.to_string(),
        kind: None,
    })
}

#[async_trait]
impl NewsSource for RiaSource {
    fn kind(&self) -> Source {
        Source::Ria
    }

    fn sparse_page(&self, count: usize) -> Option<SparsePage> {
        (count < MIN_PAGE_ITEMS).then_some(SparsePage::StepBack)
    }

    async fn fetch_page(&self, cursor: &Cursor) -> Result<ListingPage, CrawlerError> {
        let url = self.listing_url(cursor);
        let html = self.fetcher.fetch_listing(&url).await?;
        tracing::info!(source = "ria", cursor = %cursor, "Got new date");

        let raw_items = parse_ria_listing(&html, &self.selectors);

        let continuation = raw_items
            .get(CONTINUATION_ITEM_INDEX)
            .and_then(|raw| raw.href.as_deref())
            .and_then(ria_article_id);

        Ok(ListingPage {
            entries: raw_items.iter().map(raw_to_item).collect(),
            continuation,
        })
    }

    async fn fetch_article(&self, item: &ListingItem) -> Result<ArticleBody, CrawlerError> {
        let url = self.article_url(&item.location);

        let html = match self.fetcher.fetch_article(&url).await?.into_body() {
            Ok(html) => html,
            Err(reason) => return Ok(ArticleBody::Skipped(reason)),
        };

        Ok(match extract_ria_body(&html, &self.selectors) {
            Some(text) => ArticleBody::Text(text),
            None => ArticleBody::Skipped(SkipReason::MissingBody),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn source() -> RiaSource {
        let config = Config::default();
        let fetcher = NewsFetcher::new(&config.crawler).unwrap();
        RiaSource::new(fetcher, &config.sources.ria)
    }

    fn raw(href: Option<&str>, date: Option<&str>) -> RawListItem {
        RawListItem {
            href: href.map(str::to_string),
            date_text: date.map(str::to_string),
        }
    }

    #[test]
    fn test_listing_url() {
        let start = crate::utils::parse_datetime("2022-04-24 23:59:00").unwrap();
        let mut cursor = Cursor::new(start);
        assert_eq!(
            source().listing_url(&cursor),
            "https://ria.ru/services/20220424/more.html?id=0&date=20220424T235900"
        );

        cursor.set_continuation("1785001");
        assert!(source().listing_url(&cursor).contains("id=1785001"));
    }

    #[test]
    fn test_article_url() {
        let source = source();
        assert_eq!(
            source.article_url("https://ria.ru/20220424/les-1785001.html"),
            "https://ria.ru/20220424/les-1785001.html"
        );
        assert_eq!(
            source.article_url("/20220424/les-1785001.html"),
            "https://ria.ru/20220424/les-1785001.html"
        );
    }

    #[test]
    fn test_raw_to_item() {
        let item = raw_to_item(&raw(
            Some("https://ria.ru/20220424/les-1785001.html"),
            Some("24 апреля 2022, 23:50"),
        ))
        .unwrap();
        assert_eq!(item.id, "1785001");
        assert_eq!(item.published_at.to_string(), "2022-04-24 23:50:00");
        assert!(item.kind.is_none());
    }

    #[test]
    fn test_raw_to_item_skips() {
        assert_eq!(
            raw_to_item(&raw(None, Some("24 апреля 2022, 23:50"))),
            Err(SkipReason::MalformedHref)
        );
        assert_eq!(
            raw_to_item(&raw(Some("/short"), Some("24 апреля 2022, 23:50"))),
            Err(SkipReason::MalformedHref)
        );
        assert_eq!(
            raw_to_item(&raw(Some("https://ria.ru/20220424/les-1785001.html"), Some("Вчера, 23:50"))),
            Err(SkipReason::UnparseableDate)
        );
        assert_eq!(
            raw_to_item(&raw(Some("https://ria.ru/20220424/les-1785001.html"), None)),
            Err(SkipReason::UnparseableDate)
        );
    }

    #[test]
    fn test_sparse_page_threshold() {
        let source = source();
        assert_eq!(source.sparse_page(0), Some(SparsePage::StepBack));
        assert_eq!(source.sparse_page(1), Some(SparsePage::StepBack));
        assert_eq!(source.sparse_page(2), None);
    }
}
