pub mod bubbles;
pub mod classify;
pub mod crawl;

// Re-export command functions for convenience
pub use bubbles::bubbles;
pub use classify::classify;
pub use crawl::{crawl, CrawlOptions};
