//! Structured logging for the CLI
//!
//! Logs never go to stdout, which carries the translation output: console
//! logs are written to stderr, and file logs rotate daily.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "mongo-lookup.log";

/// Log format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format
    Pretty,
    /// JSON format (structured logging)
    Json,
    /// Single-line format
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    File,
    Both,
}

impl LogOutput {
    pub fn parse(s: &str) -> Self {
        match s {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            _ => LogOutput::Stderr,
        }
    }
}

fn console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

fn file_layer<S>(directory: &str) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    std::fs::create_dir_all(directory).ok();
    let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, LOG_FILE_PREFIX);

    fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .boxed()
}

/// Initialize the logging system from configuration.
///
/// An unparseable level falls back to `warn`.
pub fn init(config: &LoggingConfig) {
    let format = LogFormat::parse(&config.format);
    let output = LogOutput::parse(&config.output);

    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layers = match output {
        LogOutput::Stderr => vec![console_layer(format)],
        LogOutput::File => vec![file_layer(&config.directory)],
        LogOutput::Both => vec![console_layer(format), file_layer(&config.directory)],
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .init();

    tracing::debug!(
        format = ?format,
        output = ?output,
        level = %config.level,
        "logging initialized"
    );
}
