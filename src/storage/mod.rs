//! Dataset persistence
//!
//! Crawled articles are kept in one CSV file per source.

pub mod dataset;

pub use dataset::Dataset;
