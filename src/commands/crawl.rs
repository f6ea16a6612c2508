use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ecoscrape::classify::KeywordClassifier;
use ecoscrape::config::Config;
use ecoscrape::crawler::{CrawlLoop, LoopSettings, NewsFetcher, RiaSource, TassSource};
use ecoscrape::models::{RunReport, Source, Termination};
use ecoscrape::storage::Dataset;
use ecoscrape::utils::parse_datetime;

/// Command-line overrides for one crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub source: Source,
    pub start: Option<String>,
    pub boundary: Option<String>,
    pub output: Option<PathBuf>,
    pub delay_ms: Option<u64>,
    pub resume: bool,
}

pub async fn crawl(config: Config, options: CrawlOptions) -> Result<()> {
    let source = options.source;
    let settings = config.source(source).clone();

    let dataset_path = options
        .output
        .clone()
        .unwrap_or_else(|| config.dataset_path(source));
    let dataset = Dataset::for_source(&dataset_path, source)
        .with_context(|| format!("Failed to open dataset {}", dataset_path.display()))?;

    let mut start = match &options.start {
        Some(value) => parse_datetime(value).context("Invalid --start value")?,
        None => settings.start,
    };
    if options.resume {
        match resume_point(&dataset, source)? {
            Some(timestamp) => {
                tracing::info!(resume_from = %timestamp, "Resuming from last stored article");
                start = timestamp;
            }
            None => tracing::info!("Dataset has no stored articles, starting from configured start"),
        }
    }

    let boundary = match &options.boundary {
        Some(value) => parse_datetime(value).context("Invalid --boundary value")?,
        None => settings.boundary_at(),
    };
    if boundary > start {
        anyhow::bail!("Boundary {boundary} lies after start {start}");
    }

    let loop_settings = LoopSettings {
        start,
        boundary,
        page_delay: options
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| settings.page_delay()),
    };

    println!("Starting {} crawl", source.display_name());
    println!("========================");
    println!("  Start:    {start}");
    println!("  Boundary: {boundary}");
    println!("  Dataset:  {}", dataset_path.display());

    let fetcher = NewsFetcher::new(&config.crawler).context("Failed to create HTTP client")?;
    let classifier = KeywordClassifier::environment();

    let report = match source {
        Source::Tass => {
            CrawlLoop::new(TassSource::new(fetcher, &settings), classifier, dataset, loop_settings)
                .run()
                .await
        }
        Source::Ria => {
            CrawlLoop::new(RiaSource::new(fetcher, &settings), classifier, dataset, loop_settings)
                .run()
                .await
        }
    }
    .with_context(|| format!("Failed to write dataset {}", dataset_path.display()))?;

    print_report(&report, &dataset_path);

    if let Termination::Aborted(reason) = &report.termination {
        anyhow::bail!("Crawl aborted at {}: {reason}", report.final_cursor);
    }

    Ok(())
}

/// Date of the last stored row; crawls run backward, so this is the oldest
fn resume_point(dataset: &Dataset, source: Source) -> Result<Option<NaiveDateTime>> {
    let last = dataset
        .last_value("date")
        .context("Dataset has no date column")?;
    Ok(last.and_then(|value| source.parse_date(value)))
}

fn print_report(report: &RunReport, dataset_path: &Path) {
    println!("\nCrawl Summary");
    println!("=============");
    println!("  Termination:      {:?}", report.termination);
    println!("  Listing pages:    {}", report.pages);
    println!("  Articles fetched: {}", report.articles_fetched);
    println!(
        "  Accepted:         {} ({:.1}%)",
        report.accepted,
        report.acceptance_rate()
    );
    println!("  Skipped:          {}", report.skipped);
    println!("  Last cursor:      {}", report.final_cursor);
    println!(
        "  Dataset:          {} ({} rows)",
        dataset_path.display(),
        report.dataset_rows
    );
}
