//! Logging setup
//!
//! Events go to stdout (text or JSON) and, when a log file is given, to that
//! file through a non-blocking writer. The returned [`LogGuard`] flushes the
//! file writer when dropped, so it must live as long as the run.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Output format of the stdout log stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging options resolved from config and CLI flags
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Level for this crate's events (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    /// Raise this crate to debug regardless of `level`
    pub verbose: bool,
    /// Log file, if events should also be written to disk
    pub file: Option<PathBuf>,
}

/// Keeps the file writer alive; drop it at the end of the run
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber
///
/// `RUST_LOG` overrides the configured level when set.
///
/// # Errors
///
/// Fails if the log directory cannot be created, the level is not a valid
/// filter, or a global subscriber is already installed
pub fn init(settings: &LogSettings) -> Result<LogGuard> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(settings))
            .with_context(|| format!("Invalid log level: {}", settings.level))?,
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();

    match settings.format {
        LogFormat::Json => layers.push(fmt::layer().json().with_writer(std::io::stdout).boxed()),
        LogFormat::Text => layers.push(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .boxed(),
        ),
    }

    let file_guard = match &settings.file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            layers.push(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(false)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn filter_directive(settings: &LogSettings) -> String {
    let level = if settings.verbose {
        "debug"
    } else {
        settings.level.as_str()
    };
    format!("ecoscrape={level},warn,html5ever=error,selectors=error")
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(level: &str, verbose: bool) -> LogSettings {
        LogSettings {
            level: level.to_string(),
            format: LogFormat::Text,
            verbose,
            file: None,
        }
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn test_filter_directive() {
        assert!(filter_directive(&settings("info", false)).starts_with("ecoscrape=info,"));
        assert!(filter_directive(&settings("info", true)).starts_with("ecoscrape=debug,"));
        assert!(EnvFilter::try_new(filter_directive(&settings("warn", false))).is_ok());
    }
}
