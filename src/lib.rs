//! ecoscrape - environmental news crawler for Russian news agencies
//!
//! Walks TASS and RIA Novosti listings backward in time, keeps the articles
//! whose stemmed text mentions an environmental keyword, and stores them in
//! per-source CSV datasets.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Fetcher, news sources and the crawl loop
//! - [`parser`] - Listing and article page parsing
//! - [`classify`] - Russian stemming and keyword classification
//! - [`storage`] - CSV dataset persistence
//! - [`analytics`] - Word frequencies and word cloud rendering
//! - [`models`] - Core data structures and types
//! - [`logging`] - Tracing subscriber setup
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use ecoscrape::classify::KeywordClassifier;
//! use ecoscrape::config::Config;
//! use ecoscrape::crawler::{CrawlLoop, LoopSettings, NewsFetcher, RiaSource};
//! use ecoscrape::models::Source;
//! use ecoscrape::storage::Dataset;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let settings = config.source(Source::Ria);
//!     let fetcher = NewsFetcher::new(&config.crawler)?;
//!     let dataset = Dataset::for_source(config.dataset_path(Source::Ria), Source::Ria)?;
//!
//!     let report = CrawlLoop::new(
//!         RiaSource::new(fetcher, settings),
//!         KeywordClassifier::environment(),
//!         dataset,
//!         LoopSettings {
//!             start: settings.start,
//!             boundary: settings.boundary_at(),
//!             page_delay: settings.page_delay(),
//!         },
//!     )
//!     .run()
//!     .await?;
//!     println!("accepted {} articles", report.accepted);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod classify;
pub mod config;
pub mod crawler;
pub mod logging;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::classify::{CategoryClassifier, KeywordClassifier, KeywordSet};
    pub use crate::config::Config;
    pub use crate::crawler::{CrawlLoop, Cursor, LoopSettings, NewsSource};
    pub use crate::models::{ArticleRecord, ListingItem, RunReport, Source, Termination};
    pub use crate::storage::Dataset;
}

// Direct re-exports for convenience
pub use models::{ArticleRecord, RunReport, Source, Termination};
