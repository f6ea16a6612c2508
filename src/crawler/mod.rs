//! News crawling
//!
//! A crawl walks one source backward in time from a start timestamp to a
//! boundary date. Source specifics (URL layout, listing format, article body
//! markup) live behind the [`NewsSource`] trait; [`pipeline::CrawlLoop`]
//! drives any source through the same cursor and dataset logic.

pub mod cursor;
pub mod fetcher;
pub mod pipeline;
pub mod ria;
pub mod tass;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::models::{ArticleRecord, ListingItem, Source};
use crate::utils::error::CrawlerError;

pub use cursor::Cursor;
pub use fetcher::{ArticleFetch, NewsFetcher};
pub use pipeline::{CrawlLoop, LoopSettings};
pub use ria::RiaSource;
pub use tass::TassSource;

/// Why an item was passed over without touching the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Listing link is missing or has no article id
    MalformedHref,
    /// Listing date is missing or not in the expected layout
    UnparseableDate,
    /// Article belongs to an excluded section or another site
    ExcludedPath,
    /// Article page has no body element
    MissingBody,
    /// Article page redirected too many times
    TooManyRedirects,
    /// Article body transfer broke off
    TransferFailed,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedHref => "malformed_href",
            Self::UnparseableDate => "unparseable_date",
            Self::ExcludedPath => "excluded_path",
            Self::MissingBody => "missing_body",
            Self::TooManyRedirects => "too_many_redirects",
            Self::TransferFailed => "transfer_failed",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Article matched; persist it and move the cursor to its date
    Accepted(ArticleRecord),
    /// Article did not match; only move the cursor
    AdvanceOnly(NaiveDateTime),
    /// Leave the cursor untouched and continue with the next entry
    Skipped(SkipReason),
    /// Entry lies before the boundary date; stop the crawl
    BoundaryReached,
}

/// What to do with a listing page that has too few entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparsePage {
    /// The source has nothing older; end the crawl
    Stop,
    /// Transient gap; step the cursor back and request again
    StepBack,
}

/// One fetched listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Entries in page order, malformed ones already marked as skips
    pub entries: Vec<Result<ListingItem, SkipReason>>,
    /// Continuation id for the next request, if the page provides one
    pub continuation: Option<String>,
}

/// Article text, or the reason it could not be obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleBody {
    Text(String),
    Skipped(SkipReason),
}

impl ArticleFetch {
    /// Page body, or the soft skip reason for a failed article request
    pub fn into_body(self) -> Result<String, SkipReason> {
        match self {
            Self::Body(body) => Ok(body),
            Self::TooManyRedirects => Err(SkipReason::TooManyRedirects),
            Self::TransferFailed => Err(SkipReason::TransferFailed),
        }
    }
}

/// A news site the crawl loop can walk backward through
#[async_trait]
pub trait NewsSource: Send + Sync {
    fn kind(&self) -> Source;

    /// Decide how to handle a page with `count` entries, `None` if it is usable
    fn sparse_page(&self, count: usize) -> Option<SparsePage>;

    /// Fetch the listing page that ends at the cursor
    async fn fetch_page(&self, cursor: &Cursor) -> Result<ListingPage, CrawlerError>;

    /// Fetch and extract the article text of one entry
    async fn fetch_article(&self, item: &ListingItem) -> Result<ArticleBody, CrawlerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_fetch_conversion() {
        assert_eq!(
            ArticleFetch::Body("x".to_string()).into_body(),
            Ok("x".to_string())
        );
        assert_eq!(
            ArticleFetch::TooManyRedirects.into_body(),
            Err(SkipReason::TooManyRedirects)
        );
        assert_eq!(
            ArticleFetch::TransferFailed.into_body(),
            Err(SkipReason::TransferFailed)
        );
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::MissingBody.to_string(), "missing_body");
    }
}
