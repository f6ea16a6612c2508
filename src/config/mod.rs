//! Configuration management for the ecoscrape crawler
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Source;
use crate::utils::parse_datetime;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client configuration
    pub crawler: CrawlerConfig,

    /// Per-source crawl settings
    pub sources: SourcesConfig,

    /// Dataset storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP client configuration shared by all sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,

    /// Accept-Language header value
    pub accept_language: String,

    /// Redirect hops tolerated on article pages
    pub max_redirects: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub tass: SourceConfig,
    pub ria: SourceConfig,
}

/// Crawl settings of one news source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Site root used for article and HTML listing URLs
    pub site_base: String,

    /// API root for JSON listings, defaults to `site_base`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Newest point of the crawl; the cursor walks backward from here
    pub start: NaiveDateTime,

    /// Items published before this date stop the crawl
    pub boundary: NaiveDate,

    /// Dataset file name inside `storage.data_dir`
    pub dataset: String,

    /// Log file name inside `logging.directory`
    pub log_file: String,

    /// Pause after every listing request, in milliseconds
    pub page_delay_ms: u64,
}

impl SourceConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(&self.site_base)
    }

    /// Boundary as a timestamp (midnight of the boundary date)
    pub fn boundary_at(&self) -> NaiveDateTime {
        self.boundary.and_time(chrono::NaiveTime::MIN)
    }

    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// Dataset storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the CSV datasets
    pub data_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,

    /// Directory for per-source log files
    pub directory: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(secs) = env_parse::<u64>("ECOSCRAPE_REQUEST_TIMEOUT") {
            config.crawler.request_timeout_secs = secs;
        }
        if let Ok(user_agent) = std::env::var("ECOSCRAPE_USER_AGENT") {
            config.crawler.user_agent = user_agent;
        }

        apply_source_env(&mut config.sources.tass, "TASS")?;
        apply_source_env(&mut config.sources.ria, "RIA")?;

        if let Ok(dir) = std::env::var("ECOSCRAPE_DATA_DIR") {
            config.storage.data_dir = dir.into();
        }
        if let Ok(level) = std::env::var("ECOSCRAPE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("ECOSCRAPE_LOG_FORMAT") {
            config.logging.format = format;
        }
        if let Ok(dir) = std::env::var("ECOSCRAPE_LOG_DIR") {
            config.logging.directory = dir.into();
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            );
        }

        for source in Source::all() {
            let settings = self.source(source);

            url::Url::parse(&settings.site_base)
                .with_context(|| format!("Invalid site_base for {source}"))?;
            url::Url::parse(settings.api_base())
                .with_context(|| format!("Invalid api_base for {source}"))?;

            if settings.boundary_at() > settings.start {
                anyhow::bail!(
                    "{source}: boundary {} lies after start {}",
                    settings.boundary,
                    settings.start
                );
            }

            if settings.dataset.trim().is_empty() {
                anyhow::bail!("{source}: dataset file name must not be empty");
            }
        }

        Ok(())
    }

    /// Settings of one source
    pub fn source(&self, source: Source) -> &SourceConfig {
        match source {
            Source::Tass => &self.sources.tass,
            Source::Ria => &self.sources.ria,
        }
    }

    /// Full path of a source's dataset file
    #[must_use]
    pub fn dataset_path(&self, source: Source) -> PathBuf {
        self.storage.data_dir.join(&self.source(source).dataset)
    }

    /// Full path of a source's log file
    #[must_use]
    pub fn log_path(&self, source: Source) -> PathBuf {
        self.logging.directory.join(&self.source(source).log_file)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

fn apply_source_env(settings: &mut SourceConfig, prefix: &str) -> Result<()> {
    if let Ok(base) = std::env::var(format!("ECOSCRAPE_{prefix}_BASE_URL")) {
        settings.site_base = base;
    }
    if let Ok(base) = std::env::var(format!("ECOSCRAPE_{prefix}_API_URL")) {
        settings.api_base = Some(base);
    }
    if let Ok(start) = std::env::var(format!("ECOSCRAPE_{prefix}_START")) {
        settings.start = parse_datetime(&start)
            .with_context(|| format!("Invalid ECOSCRAPE_{prefix}_START"))?;
    }
    if let Ok(boundary) = std::env::var(format!("ECOSCRAPE_{prefix}_BOUNDARY")) {
        settings.boundary = parse_datetime(&boundary)
            .with_context(|| format!("Invalid ECOSCRAPE_{prefix}_BOUNDARY"))?
            .date();
    }
    if let Ok(dataset) = std::env::var(format!("ECOSCRAPE_{prefix}_DATASET")) {
        settings.dataset = dataset;
    }
    if let Some(delay) = env_parse::<u64>(&format!("ECOSCRAPE_{prefix}_DELAY_MS")) {
        settings.page_delay_ms = delay;
    }
    Ok(())
}

fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap_or_default()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                request_timeout_secs: 60,
                user_agent: String::from(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36",
                ),
                accept_language: String::from("en-US,en;q=0.9,ru;q=0.8,af;q=0.7"),
                max_redirects: 1,
            },
            sources: SourcesConfig {
                tass: SourceConfig {
                    site_base: String::from("https://tass.ru"),
                    api_base: None,
                    start: datetime(2021, 2, 6, 8, 43, 17),
                    boundary: datetime(2021, 1, 1, 0, 0, 0).date(),
                    dataset: String::from("tass_data_2021.csv"),
                    log_file: String::from("tass.log"),
                    page_delay_ms: 3000,
                },
                ria: SourceConfig {
                    site_base: String::from("https://ria.ru"),
                    api_base: None,
                    start: datetime(2022, 4, 24, 23, 59, 0),
                    boundary: datetime(2022, 1, 1, 0, 0, 0).date(),
                    dataset: String::from("ria_data_2022.csv"),
                    log_file: String::from("ria.log"),
                    page_delay_ms: 1000,
                },
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
                directory: PathBuf::from("logs"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = Config::default();
        config.crawler.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boundary_after_start_is_invalid() {
        let mut config = Config::default();
        config.sources.ria.boundary = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_is_invalid() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paths_and_api_base() {
        let config = Config::default();
        assert_eq!(
            config.dataset_path(Source::Ria),
            PathBuf::from("data/ria_data_2022.csv")
        );
        assert_eq!(config.log_path(Source::Tass), PathBuf::from("logs/tass.log"));
        assert_eq!(config.source(Source::Tass).api_base(), "https://tass.ru");
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.sources.tass.start, Config::default().sources.tass.start);
        assert_eq!(parsed.sources.ria.boundary, Config::default().sources.ria.boundary);
    }
}
