//! Listing page parsing for TASS (JSON) and RIA Novosti (HTML)
//!
//! Parsers here never fail a whole page because of one bad entry: they return
//! raw fields and leave the skip decision to the caller.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;
use serde::Deserialize;

use crate::parser::selectors::RiaSelectors;
use crate::utils::normalize_whitespace;

lazy_static! {
    static ref RIA_DATE_SHAPE: Regex =
        Regex::new(r"\d .* \d{4}, \d{2}:\d{2}").expect("Invalid RIA date shape pattern");
    static ref RIA_DATE_PARTS: Regex =
        Regex::new(r"^(\d{1,2}) (\p{L}+) (\d{4}), (\d{2}):(\d{2})$")
            .expect("Invalid RIA date parts pattern");
    static ref TASS_TIMESTAMP: Regex =
        Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}")
            .expect("Invalid TASS timestamp pattern");
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").expect("Invalid digit pattern");
}

/// Segment of `href.split('/')` holding the article slug:
/// `https:` / `` / `ria.ru` / `20220424` / `slug-1782345.html`
const RIA_SLUG_SEGMENT: usize = 4;

/// TASS section whose articles are never crawled
const TASS_EXCLUDED_SECTION: &str = "nauka";

/// One `div.list-item` of a RIA listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListItem {
    pub href: Option<String>,
    pub date_text: Option<String>,
}

/// Extract list items in page order
pub fn parse_ria_listing(html: &str, selectors: &RiaSelectors) -> Vec<RawListItem> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.list_item)
        .map(|item| RawListItem {
            href: item
                .select(&selectors.item_link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string),
            date_text: item
                .select(&selectors.item_date)
                .next()
                .map(|d| normalize_whitespace(&d.text().collect::<String>())),
        })
        .collect()
}

/// Article id: first digit run of the slug segment
///
/// Returns `None` when the href has fewer than five `/`-separated segments or
/// the slug carries no digits.
pub fn ria_article_id(href: &str) -> Option<String> {
    let segment = href.split('/').nth(RIA_SLUG_SEGMENT)?;
    DIGIT_RUN.find(segment).map(|m| m.as_str().to_string())
}

/// Parse `"24 апреля 2022, 23:59"`
///
/// Relative dates such as `"Вчера, 23:59"` or a bare `"23:59"` are rejected.
pub fn parse_ria_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if !RIA_DATE_SHAPE.is_match(text) {
        return None;
    }

    let caps = RIA_DATE_PARTS.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = russian_month(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// Month number for a Russian month name, genitive or nominative
fn russian_month(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "января" | "январь" => 1,
        "февраля" | "февраль" => 2,
        "марта" | "март" => 3,
        "апреля" | "апрель" => 4,
        "мая" | "май" => 5,
        "июня" | "июнь" => 6,
        "июля" | "июль" => 7,
        "августа" | "август" => 8,
        "сентября" | "сентябрь" => 9,
        "октября" | "октябрь" => 10,
        "ноября" | "ноябрь" => 11,
        "декабря" | "декабрь" => 12,
        _ => return None,
    };
    Some(month)
}

/// TASS search API response
#[derive(Debug, Clone, Deserialize)]
pub struct TassSearchResponse {
    pub result: Option<Vec<TassEntry>>,
}

/// TASS ids arrive as numbers, occasionally as strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of the TASS search API
#[derive(Debug, Clone, Deserialize)]
pub struct TassEntry {
    pub id: EntryId,
    #[serde(default)]
    pub es_updated_dt: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Parse `es_updated_dt` (`2021-02-06T08:43:17.123456`)
pub fn parse_tass_timestamp(value: &str) -> Option<NaiveDateTime> {
    let found = TASS_TIMESTAMP.find(value)?;
    NaiveDateTime::parse_from_str(found.as_str(), "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Science section and off-site links are never crawled
pub fn is_excluded_tass_path(path: &str) -> bool {
    path.split('/').nth(1) == Some(TASS_EXCLUDED_SECTION) || path.contains("http")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ria_listing_in_order() {
        let html = r#"
            <div class="list-item">
                <a href="https://ria.ru/20220424/les-1785001.html">Лес</a>
                <div class="list-item__date">24 апреля 2022, 23:50</div>
            </div>
            <div class="list-item">
                <span>без ссылки</span>
            </div>"#;
        let items = parse_ria_listing(html, &RiaSelectors::new());
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].href.as_deref(),
            Some("https://ria.ru/20220424/les-1785001.html")
        );
        assert_eq!(items[0].date_text.as_deref(), Some("24 апреля 2022, 23:50"));
        assert_eq!(items[1], RawListItem { href: None, date_text: None });
    }

    #[test]
    fn test_ria_article_id() {
        assert_eq!(
            ria_article_id("https://ria.ru/20220424/les-1785001.html"),
            Some("1785001".to_string())
        );
        assert_eq!(ria_article_id("/20220424/x"), None);
        assert_eq!(ria_article_id("https://ria.ru/20220424/no-digits.html"), None);
    }

    #[test]
    fn test_parse_ria_date_genitive() {
        let parsed = parse_ria_date("24 апреля 2022, 23:59").unwrap();
        assert_eq!(parsed.to_string(), "2022-04-24 23:59:00");
    }

    #[test]
    fn test_parse_ria_date_nominative_and_single_digit_day() {
        let parsed = parse_ria_date("3 Май 2022, 07:05").unwrap();
        assert_eq!(parsed.to_string(), "2022-05-03 07:05:00");
    }

    #[test]
    fn test_parse_ria_date_rejects_relative() {
        assert!(parse_ria_date("Вчера, 23:59").is_none());
        assert!(parse_ria_date("23:59").is_none());
        assert!(parse_ria_date("31 февраля 2022, 10:00").is_none());
    }

    #[test]
    fn test_tass_response_deserialize() {
        let json = r#"{"result":[
            {"id": 10640023, "es_updated_dt": "2021-02-06T08:43:17.123456", "url": "/obschestvo/10640023", "type": "news"},
            {"id": "abc", "es_updated_dt": "bad", "url": "/nauka/1"}
        ]}"#;
        let response: TassSearchResponse = serde_json::from_str(json).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result[0].id.to_string(), "10640023");
        assert_eq!(result[0].kind.as_deref(), Some("news"));
        assert_eq!(result[1].id, EntryId::Text("abc".to_string()));
        assert!(result[1].kind.is_none());
    }

    #[test]
    fn test_parse_tass_timestamp() {
        let parsed = parse_tass_timestamp("2021-02-06T08:43:17.123456").unwrap();
        assert_eq!(parsed.to_string(), "2021-02-06 08:43:17.123456");
        assert!(parse_tass_timestamp("2021-02-06T08:43:17").is_none());
        assert!(parse_tass_timestamp("").is_none());
    }

    #[test]
    fn test_excluded_tass_paths() {
        assert!(is_excluded_tass_path("/nauka/10640023"));
        assert!(is_excluded_tass_path("https://nauka.tass.ru/x"));
        assert!(!is_excluded_tass_path("/obschestvo/10640023"));
    }
}
