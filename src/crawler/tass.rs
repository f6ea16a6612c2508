//! TASS source: JSON search API listings, `<article>` bodies

use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::crawler::{
    ArticleBody, Cursor, ListingPage, NewsFetcher, NewsSource, SkipReason, SparsePage,
};
use crate::models::{ListingItem, Source};
use crate::parser::{
    extract_tass_body, is_excluded_tass_path, parse_tass_timestamp, TassEntry,
    TassSearchResponse, TassSelectors,
};
use crate::utils::error::{CrawlerError, ParseError};

/// Entries requested per listing call
pub const PAGE_LIMIT: usize = 20;

/// Timestamp layout of the `last_es_updated_dt` query parameter
const CURSOR_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub struct TassSource {
    fetcher: NewsFetcher,
    api_base: String,
    site_base: String,
    selectors: TassSelectors,
}

impl TassSource {
    pub fn new(fetcher: NewsFetcher, settings: &SourceConfig) -> Self {
        Self {
            fetcher,
            api_base: settings.api_base().trim_end_matches('/').to_string(),
            site_base: settings.site_base.trim_end_matches('/').to_string(),
            selectors: TassSelectors::new(),
        }
    }

    /// Search API URL returning the entries updated before the cursor
    pub fn listing_url(&self, cursor: &Cursor) -> String {
        format!(
            "{}/tbp/api/v1/search?limit={PAGE_LIMIT}&last_es_updated_dt={}&lang=ru&sort=-es_updated_dt",
            self.api_base,
            cursor.timestamp().format(CURSOR_FORMAT)
        )
    }

    pub fn article_url(&self, path: &str) -> String {
        format!("{}{path}", self.site_base)
    }
}

/// Turn an API entry into a listing item, or the reason to skip it
fn entry_to_item(entry: TassEntry) -> Result<ListingItem, SkipReason> {
    let published_at =
        parse_tass_timestamp(&entry.es_updated_dt).ok_or(SkipReason::UnparseableDate)?;

    if is_excluded_tass_path(&entry.url) {
        return Err(SkipReason::ExcludedPath);
    }

    Ok(ListingItem {
        id: entry.id.to_string(),
        published_at,
        location: entry.url,
        kind: entry.kind,
    })
}

#[async_trait]
impl NewsSource for TassSource {
    fn kind(&self) -> Source {
        Source::Tass
    }

    fn sparse_page(&self, count: usize) -> Option<SparsePage> {
        (count == 0).then_some(SparsePage::Stop)
    }

    async fn fetch_page(&self, cursor: &Cursor) -> Result<ListingPage, CrawlerError> {
        let url = self.listing_url(cursor);
        let response: TassSearchResponse = self.fetcher.fetch_json(&url).await?;
        tracing::info!(source = "tass", cursor = %cursor, "Got new date");

        let result = response.result.ok_or(ParseError::MissingResult)?;

        Ok(ListingPage {
            entries: result.into_iter().map(entry_to_item).collect(),
            continuation: None,
        })
    }

    async fn fetch_article(&self, item: &ListingItem) -> Result<ArticleBody, CrawlerError> {
        let url = self.article_url(&item.location);

        let html = match self.fetcher.fetch_article(&url).await?.into_body() {
            Ok(html) => html,
            Err(reason) => return Ok(ArticleBody::Skipped(reason)),
        };

        Ok(match extract_tass_body(&html, &self.selectors) {
            Some(text) => ArticleBody::Text(text),
            None => ArticleBody::Skipped(SkipReason::MissingBody),
        })
    }
}
