// Core data structures for the ecoscrape crawler

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::crawler::cursor::Cursor;

/// News source crawled by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// TASS wire service, JSON search API
    Tass,
    /// RIA Novosti portal, HTML listing pages
    Ria,
}

impl Source {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tass => "tass",
            Self::Ria => "ria",
        }
    }

    /// Human-readable agency name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tass => "ТАСС",
            Self::Ria => "РИА Новости",
        }
    }

    /// Create from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tass" | "тасс" => Some(Self::Tass),
            "ria" | "риа" => Some(Self::Ria),
            _ => None,
        }
    }

    /// Dataset header row
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Tass => &["id", "date", "path", "type", "text"],
            Self::Ria => &["id", "date", "url", "text"],
        }
    }

    /// Row written when a dataset file is created from scratch
    pub fn placeholder_row(&self) -> &'static [&'static str] {
        match self {
            Self::Tass => &["1", "2025-01-01", "path", "type", "text"],
            Self::Ria => &["1", "2025-01-01", "url", "text"],
        }
    }

    /// `strftime` layout of the `date` column
    pub fn date_format(&self) -> &'static str {
        match self {
            Self::Tass => "%Y-%m-%d %H:%M:%S%.6f",
            Self::Ria => "%d-%m-%Y %H:%M",
        }
    }

    pub fn format_date(&self, timestamp: NaiveDateTime) -> String {
        timestamp.format(self.date_format()).to_string()
    }

    /// Parse a `date` column value written by [`Self::format_date`]
    pub fn parse_date(&self, value: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.trim(), self.date_format()).ok()
    }

    /// Get all sources
    pub fn all() -> Vec<Self> {
        vec![Self::Tass, Self::Ria]
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    /// Article identifier assigned by the source
    pub id: String,
    /// Publication (TASS: index update) timestamp
    pub published_at: NaiveDateTime,
    /// Relative path (TASS) or absolute URL (RIA)
    pub location: String,
    /// Material type tag (TASS only)
    pub kind: Option<String>,
}

/// Article persisted to the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub source: Source,
    pub id: String,
    pub date: String,
    pub location: String,
    pub kind: Option<String>,
    /// Lower-cased article text
    pub text: String,
}

impl ArticleRecord {
    /// Build a record from a listing item and its article text
    pub fn from_item(source: Source, item: &ListingItem, text: String) -> Self {
        Self {
            source,
            id: item.id.clone(),
            date: source.format_date(item.published_at),
            location: item.location.clone(),
            kind: item.kind.clone(),
            text: text.to_lowercase(),
        }
    }

    /// Row in the column order of [`Source::columns`]
    pub fn to_row(&self) -> Vec<String> {
        match self.source {
            Source::Tass => vec![
                self.id.clone(),
                self.date.clone(),
                self.location.clone(),
                self.kind.clone().unwrap_or_default(),
                self.text.clone(),
            ],
            Source::Ria => vec![
                self.id.clone(),
                self.date.clone(),
                self.location.clone(),
                self.text.clone(),
            ],
        }
    }
}

/// How a crawl run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// An item older than the boundary date was reached
    BoundaryReached,
    /// The source returned no more items
    Exhausted,
    /// An unexpected error stopped the run; collected rows were still flushed
    Aborted(String),
}

impl Termination {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

/// Run-scoped crawl statistics
#[derive(Debug, Clone)]
pub struct RunReport {
    pub source: Source,
    /// Article pages fetched and inspected
    pub articles_fetched: u64,
    /// Rows appended to the dataset
    pub accepted: u64,
    /// Items skipped without touching the cursor
    pub skipped: u64,
    /// Listing pages requested
    pub pages: u64,
    pub final_cursor: Cursor,
    pub termination: Termination,
    /// Total rows written, placeholder and earlier runs included
    pub dataset_rows: usize,
}

impl RunReport {
    /// Share of fetched articles that were accepted, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.articles_fetched == 0 {
            0.0
        } else {
            (self.accepted as f64 / self.articles_fetched as f64) * 100.0
        }
    }
}
