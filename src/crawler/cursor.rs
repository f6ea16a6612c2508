//! Backward-walking pagination cursor
//!
//! The cursor marks the oldest point the crawl has reached. It only ever
//! moves backward in time: accepted and rejected items re-anchor it to their
//! own timestamp, and a sparse page steps it back by [`STEP_BACK_MINUTES`].

use chrono::{Duration, NaiveDateTime};

/// Step taken when a listing page comes back (nearly) empty
pub const STEP_BACK_MINUTES: i64 = 1;

/// Continuation id sent before any page has provided one
pub const INITIAL_CONTINUATION: &str = "0";

/// Resume point of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    timestamp: NaiveDateTime,
    continuation: Option<String>,
}

impl Cursor {
    #[must_use]
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            continuation: None,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Continuation id for sources that page by id, `"0"` before the first one
    pub fn continuation(&self) -> &str {
        self.continuation.as_deref().unwrap_or(INITIAL_CONTINUATION)
    }

    pub fn set_continuation(&mut self, id: impl Into<String>) {
        self.continuation = Some(id.into());
    }

    /// Re-anchor to an item's timestamp
    ///
    /// Returns `false` and leaves the cursor untouched when `timestamp` lies
    /// after the current position.
    pub fn advance_to(&mut self, timestamp: NaiveDateTime) -> bool {
        if timestamp > self.timestamp {
            tracing::warn!(
                cursor = %self.timestamp,
                item = %timestamp,
                "Ignoring cursor move forward in time"
            );
            return false;
        }
        self.timestamp = timestamp;
        true
    }

    /// Move strictly backward by one step
    pub fn step_back(&mut self) {
        self.timestamp -= Duration::minutes(STEP_BACK_MINUTES);
    }

    pub fn is_before(&self, boundary: NaiveDateTime) -> bool {
        self.timestamp < boundary
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.continuation {
            Some(id) => write!(f, "{} (id {id})", self.timestamp),
            None => write!(f, "{}", self.timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 4, 24)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_advance_backward() {
        let mut cursor = Cursor::new(at(23, 59));
        assert!(cursor.advance_to(at(23, 10)));
        assert_eq!(cursor.timestamp(), at(23, 10));
    }

    #[test]
    fn test_advance_to_same_time_is_allowed() {
        let mut cursor = Cursor::new(at(12, 0));
        assert!(cursor.advance_to(at(12, 0)));
        assert_eq!(cursor.timestamp(), at(12, 0));
    }

    #[test]
    fn test_advance_forward_is_refused() {
        let mut cursor = Cursor::new(at(12, 0));
        assert!(!cursor.advance_to(at(13, 0)));
        assert_eq!(cursor.timestamp(), at(12, 0));
    }

    #[test]
    fn test_step_back_is_strictly_backward() {
        let mut cursor = Cursor::new(at(0, 0));
        cursor.step_back();
        assert!(cursor.timestamp() < at(0, 0));
        assert_eq!(at(0, 0) - cursor.timestamp(), Duration::minutes(1));
    }

    #[test]
    fn test_continuation_defaults_to_zero() {
        let mut cursor = Cursor::new(at(12, 0));
        assert_eq!(cursor.continuation(), "0");
        cursor.set_continuation("1782345");
        assert_eq!(cursor.continuation(), "1782345");
        assert_eq!(cursor.to_string(), "2022-04-24 12:00:00 (id 1782345)");
    }
}
