//! HTML and JSON parsing for news listing and article pages
//!
//! Parsing is synchronous and returns owned data, so no document is held
//! across an await point.

pub mod html;
pub mod listing;
pub mod selectors;

pub use html::{extract_ria_body, extract_tass_body};
pub use listing::{
    is_excluded_tass_path, parse_ria_date, parse_ria_listing, parse_tass_timestamp,
    ria_article_id, EntryId, RawListItem, TassEntry, TassSearchResponse,
};
pub use selectors::{RiaSelectors, TassSelectors};
