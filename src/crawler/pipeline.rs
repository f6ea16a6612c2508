//! Sequential backward crawl loop
//!
//! # Flow
//!
//! ```text
//! fetch listing page ──▶ sparse? ──▶ step back / stop
//!        │
//!        ▼
//!  for each entry: skip? ──▶ before boundary? ──▶ fetch article ──▶ classify
//!        │                          │                                  │
//!   cursor kept                   stop                   accept row / move cursor
//! ```
//!
//! Any error inside the loop ends the run as [`Termination::Aborted`]; the
//! dataset is flushed exactly once either way.

use chrono::NaiveDateTime;
use std::time::Duration;

use crate::classify::KeywordClassifier;
use crate::crawler::{
    ArticleBody, Cursor, ItemOutcome, ListingPage, NewsSource, SkipReason, SparsePage,
};
use crate::models::{ArticleRecord, ListingItem, RunReport, Termination};
use crate::storage::Dataset;
use crate::utils::error::{CrawlerError, StorageError};
use crate::utils::truncate_text;

/// Bounds and pacing of one crawl
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Newest timestamp; the cursor starts here
    pub start: NaiveDateTime,
    /// Entries strictly older than this end the crawl
    pub boundary: NaiveDateTime,
    /// Pause after every listing request
    pub page_delay: Duration,
}

#[derive(Debug, Default)]
struct Progress {
    articles_fetched: u64,
    accepted: u64,
    skipped: u64,
    pages: u64,
}

/// Drives one [`NewsSource`] from the start timestamp back to the boundary
pub struct CrawlLoop<S: NewsSource> {
    source: S,
    classifier: KeywordClassifier,
    dataset: Dataset,
    settings: LoopSettings,
    cursor: Cursor,
    progress: Progress,
}

impl<S: NewsSource> CrawlLoop<S> {
    pub fn new(
        source: S,
        classifier: KeywordClassifier,
        dataset: Dataset,
        settings: LoopSettings,
    ) -> Self {
        let cursor = Cursor::new(settings.start);
        Self {
            source,
            classifier,
            dataset,
            settings,
            cursor,
            progress: Progress::default(),
        }
    }

    /// Run the crawl to completion and flush the dataset
    ///
    /// # Errors
    ///
    /// Only a failure to write the dataset is returned; crawl errors are
    /// reported through [`RunReport::termination`].
    pub async fn run(mut self) -> Result<RunReport, StorageError> {
        let kind = self.source.kind();
        tracing::info!(
            source = %kind,
            start = %self.settings.start,
            boundary = %self.settings.boundary,
            "Starting crawl"
        );

        let termination = match self.crawl().await {
            Ok(termination) => termination,
            Err(e) => {
                tracing::error!(
                    source = %kind,
                    cursor = %self.cursor,
                    error = %e,
                    recoverable = e.is_recoverable(),
                    "An error occured"
                );
                Termination::Aborted(e.to_string())
            }
        };

        let Self {
            dataset,
            cursor,
            progress,
            ..
        } = self;

        let dataset_rows = dataset.len();
        dataset.flush()?;

        tracing::info!(
            source = %kind,
            articles = progress.articles_fetched,
            accepted = progress.accepted,
            cursor = %cursor,
            "Crawl finished, analysed {} articles, last cursor {}",
            progress.articles_fetched,
            cursor
        );

        Ok(RunReport {
            source: kind,
            articles_fetched: progress.articles_fetched,
            accepted: progress.accepted,
            skipped: progress.skipped,
            pages: progress.pages,
            final_cursor: cursor,
            termination,
            dataset_rows,
        })
    }

    async fn crawl(&mut self) -> Result<Termination, CrawlerError> {
        loop {
            let page = self.source.fetch_page(&self.cursor).await?;
            self.progress.pages += 1;

            if !self.settings.page_delay.is_zero() {
                tokio::time::sleep(self.settings.page_delay).await;
            }

            match self.source.sparse_page(page.entries.len()) {
                Some(SparsePage::Stop) => {
                    tracing::info!(cursor = %self.cursor, "Source has no older entries");
                    return Ok(Termination::Exhausted);
                }
                Some(SparsePage::StepBack) => {
                    if self.step_back() {
                        return Ok(Termination::BoundaryReached);
                    }
                    continue;
                }
                None => {}
            }

            if let Some(termination) = self.process_page(page).await? {
                return Ok(termination);
            }
        }
    }

    /// Process every entry of a page; `Some` ends the crawl
    async fn process_page(
        &mut self,
        page: ListingPage,
    ) -> Result<Option<Termination>, CrawlerError> {
        let position_before = self.cursor.clone();

        if let Some(id) = page.continuation {
            self.cursor.set_continuation(id);
        }

        for entry in page.entries {
            match self.process_item(entry).await? {
                ItemOutcome::Accepted(record) => self.accept(record)?,
                ItemOutcome::AdvanceOnly(timestamp) => {
                    self.cursor.advance_to(timestamp);
                }
                ItemOutcome::Skipped(reason) => {
                    self.progress.skipped += 1;
                    tracing::debug!(reason = %reason, cursor = %self.cursor, "Skipping entry");
                }
                ItemOutcome::BoundaryReached => {
                    tracing::info!(
                        cursor = %self.cursor,
                        boundary = %self.settings.boundary,
                        "Reached boundary date"
                    );
                    return Ok(Some(Termination::BoundaryReached));
                }
            }
        }

        // A page that moved nothing would be requested again unchanged
        if self.cursor == position_before && self.step_back() {
            return Ok(Some(Termination::BoundaryReached));
        }

        Ok(None)
    }

    async fn process_item(
        &mut self,
        entry: Result<ListingItem, SkipReason>,
    ) -> Result<ItemOutcome, CrawlerError> {
        let item = match entry {
            Ok(item) => item,
            Err(reason) => return Ok(ItemOutcome::Skipped(reason)),
        };

        if item.published_at < self.settings.boundary {
            return Ok(ItemOutcome::BoundaryReached);
        }

        let body = self.source.fetch_article(&item).await?;
        self.progress.articles_fetched += 1;
        tracing::info!("Articles analysed so far: {}", self.progress.articles_fetched);

        let text = match body {
            ArticleBody::Text(text) => text,
            ArticleBody::Skipped(reason) => return Ok(ItemOutcome::Skipped(reason)),
        };

        if self.classifier.matches(&text) {
            tracing::info!(
                id = %item.id,
                date = %item.published_at,
                preview = %truncate_text(&text, 80),
                "Found environment article"
            );
            Ok(ItemOutcome::Accepted(ArticleRecord::from_item(
                self.source.kind(),
                &item,
                text,
            )))
        } else {
            Ok(ItemOutcome::AdvanceOnly(item.published_at))
        }
    }

    fn accept(&mut self, record: ArticleRecord) -> Result<(), CrawlerError> {
        self.dataset.append_record(&record)?;
        self.progress.accepted += 1;

        // The cursor follows the stored date, at the precision the dataset keeps
        match record.source.parse_date(&record.date) {
            Some(timestamp) => {
                self.cursor.advance_to(timestamp);
            }
            None => tracing::warn!(date = %record.date, "Stored date does not parse back"),
        }
        Ok(())
    }

    /// Step the cursor back; returns true if it crossed the boundary
    fn step_back(&mut self) -> bool {
        self.cursor.step_back();
        if self.cursor.is_before(self.settings.boundary) {
            tracing::info!(cursor = %self.cursor, "Step back crossed the boundary date");
            return true;
        }
        tracing::info!(cursor = %self.cursor, "Listing page moved nothing, stepping back");
        false
    }
}
