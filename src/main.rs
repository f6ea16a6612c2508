mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ecoscrape::config::Config;
use ecoscrape::logging::{self, LogFormat, LogSettings};
use ecoscrape::models::Source;

#[derive(Parser)]
#[command(
    name = "ecoscrape",
    version,
    about = "Environmental news crawler for TASS and RIA Novosti",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); ECOSCRAPE_* environment variables otherwise
    #[arg(short, long, global = true, env = "ECOSCRAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Tass,
    Ria,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Tass => Source::Tass,
            SourceArg::Ria => Source::Ria,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a news source backward in time and store environmental articles
    Crawl {
        /// News source to crawl
        #[arg(value_enum)]
        source: SourceArg,

        /// Newest timestamp to start from (e.g. "2022-04-24 23:59:00")
        #[arg(long)]
        start: Option<String>,

        /// Stop at entries published before this date (e.g. "2022-01-01")
        #[arg(long)]
        boundary: Option<String>,

        /// Dataset CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pause after every listing request, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Continue from the date of the last row already in the dataset
        #[arg(long, default_value = "false")]
        resume: bool,
    },

    /// Assign keyword categories to a collected dataset
    Classify {
        /// Input dataset CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column holding the article text
        #[arg(long, default_value = "text")]
        text_column: String,
    },

    /// Render the most frequent words of a dataset as an SVG word cloud
    Bubbles {
        /// Input dataset CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long, default_value = "word_cloud.svg")]
        output: PathBuf,

        /// Number of words to show
        #[arg(long, default_value = "100")]
        top: usize,

        /// Column holding the article text
        #[arg(long, default_value = "text")]
        text_column: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    let format_name = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    let format = LogFormat::parse(format_name)
        .with_context(|| format!("Unknown log format: {format_name}"))?;

    let log_file = match &cli.command {
        Commands::Crawl { source, .. } => Some(config.log_path((*source).into())),
        _ => None,
    };

    let _log_guard = logging::init(&LogSettings {
        level: config.logging.level.clone(),
        format,
        verbose: cli.verbose,
        file: log_file,
    })?;

    tracing::info!("ecoscrape starting");

    match cli.command {
        Commands::Crawl {
            source,
            start,
            boundary,
            output,
            delay_ms,
            resume,
        } => {
            let source = Source::from(source);
            tracing::info!(
                source = %source,
                start = ?start,
                boundary = ?boundary,
                output = ?output,
                resume = %resume,
                "Starting crawl command"
            );
            commands::crawl(
                config,
                commands::CrawlOptions {
                    source,
                    start,
                    boundary,
                    output,
                    delay_ms,
                    resume,
                },
            )
            .await?;
        }

        Commands::Classify {
            input,
            output,
            text_column,
        } => {
            tracing::info!(
                input = %input.display(),
                output = ?output,
                text_column = %text_column,
                "Starting classify command"
            );
            commands::classify(&input, output.as_deref(), &text_column)?;
        }

        Commands::Bubbles {
            input,
            output,
            top,
            text_column,
        } => {
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                top = %top,
                "Starting bubbles command"
            );
            commands::bubbles(&input, &output, top, &text_column)?;
        }
    }

    tracing::info!("ecoscrape completed successfully");
    Ok(())
}
