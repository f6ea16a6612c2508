//! Common test utilities

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

use ecoscrape::config::Config;
use ecoscrape::crawler::LoopSettings;

/// Article text that matches the environment keyword list
pub const ENVIRONMENT_TEXT: &str = "Экология Байкала под угрозой из-за сброса отходов";

/// Article text that matches nothing
pub const UNRELATED_TEXT: &str = "Центральный банк сохранил ключевую ставку";

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

pub fn at_micro(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micro: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_micro_opt(h, mi, s, micro)
        .unwrap()
}

/// Default config with both sources pointed at a mock server
pub fn config_for(base: &str) -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 5;
    config.sources.tass.site_base = base.to_string();
    config.sources.ria.site_base = base.to_string();
    config.sources.tass.page_delay_ms = 0;
    config.sources.ria.page_delay_ms = 0;
    config
}

/// Loop settings without page delay
pub fn loop_settings(start: NaiveDateTime, boundary: NaiveDateTime) -> LoopSettings {
    LoopSettings {
        start,
        boundary,
        page_delay: Duration::ZERO,
    }
}

/// RIA "more.html" fragment; each item is (href, date text)
pub fn ria_listing_html(items: &[(Option<String>, Option<&str>)]) -> String {
    let mut html = String::from("<div class=\"list-items\">");
    for (href, date) in items {
        html.push_str("<div class=\"list-item\">");
        if let Some(href) = href {
            html.push_str(&format!("<a href=\"{href}\">Заголовок</a>"));
        }
        if let Some(date) = date {
            html.push_str(&format!("<div class=\"list-item__date\">{date}</div>"));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

pub fn ria_article_html(text: &str) -> String {
    format!(
        "<html><body><h1>Заголовок</h1>\
         <div class=\"article__body js-mediator-article mia-analytics\"><p>{text}</p></div>\
         </body></html>"
    )
}

pub fn tass_article_html(text: &str) -> String {
    format!(
        "<html><body><article><p>{text}</p><div>Читайте также</div><p>Другая новость</p></article></body></html>"
    )
}

/// TASS search API payload; each entry is (id, es_updated_dt, url)
pub fn tass_listing_json(entries: &[(u64, &str, &str)]) -> serde_json::Value {
    let result: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, date, url)| {
            serde_json::json!({
                "id": id,
                "es_updated_dt": date,
                "url": url,
                "type": "news",
            })
        })
        .collect();
    serde_json::json!({ "result": result })
}
