//! Structured logging setup for hostprobe
//!
//! Log lines go to a log file and, optionally, to stdout. Both sinks share one
//! `EnvFilter`, which honours `RUST_LOG` when it is set.
//!
//! # Example
//!
//! ```no_run
//! use hostprobe::util::{init_logging, LoggingConfig};
//! use std::path::PathBuf;
//!
//! let config = LoggingConfig {
//!     log_file: Some(PathBuf::from("system_discovery.log")),
//!     ..Default::default()
//! };
//! init_logging(config).expect("log file should be writable");
//!
//! tracing::info!("Starting system discovery");
//! ```

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., hostprobe::resolve) in logs
    pub include_target: bool,

    /// File that receives every log line, truncated on startup
    pub log_file: Option<PathBuf>,

    /// Also write log lines to stdout
    pub console: bool,
}

impl Default for LoggingConfig {
    /// INFO level, plain text, console only
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            log_file: None,
            console: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level from a string
///
/// # Returns
///
/// The corresponding `Level`, or `Level::INFO` if parsing fails
///
/// # Example
///
/// ```
/// use hostprobe::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("hostprobe={}", level))
    }
}

fn sink<S, W>(config: &LoggingConfig, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.include_target)
        .with_ansi(ansi);

    if config.use_json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn install(config: &LoggingConfig) -> Result<()> {
    let file = match &config.log_file {
        Some(path) => Some(Arc::new(File::create(path).with_context(|| {
            format!("Failed to create log file: {}", path.display())
        })?)),
        None => None,
    };

    let file_layer = file.map(|file| sink(config, file, false));
    let console_layer = config
        .console
        .then(|| sink(config, std::io::stdout, true));

    tracing_subscriber::registry()
        .with(build_filter(config.level))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}

/// Initializes the logging system with the provided configuration
///
/// Only the first call has any effect. Fails when the log file cannot be
/// created.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = install(&config);
    });
    result
}
