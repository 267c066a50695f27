//! Structured logging infrastructure for Nowcast Notice

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output with colors
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON, suited to log collectors
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "nowcast_bot=trace")
    pub level: String,
    /// Line format
    pub format: LogFormat,
    /// Optional file path for log output; stdout when absent
    pub file_path: Option<PathBuf>,
    /// Whether to include span open/close events in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// When logging to a file the returned guard must be held until shutdown so
/// buffered lines are flushed.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (writer, guard) = match &config.file_path {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| format!("log file path has no file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };
    let ansi = writer.is_none() && config.format == LogFormat::Pretty;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = {
        let base = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_ansi(ansi);

        match (config.format, writer) {
            (LogFormat::Json, Some(w)) => base.json().with_writer(w).boxed(),
            (LogFormat::Json, None) => base.json().boxed(),
            (LogFormat::Pretty, Some(w)) => base.pretty().with_writer(w).boxed(),
            (LogFormat::Pretty, None) => base.pretty().boxed(),
            (LogFormat::Compact, Some(w)) => base.compact().with_writer(w).boxed(),
            (LogFormat::Compact, None) => base.compact().boxed(),
        }
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()?;

    Ok(guard)
}
