//! Report serialization
//!
//! Reports are written as pretty-printed JSON or as YAML, with the same field
//! names in both.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::discovery::DiscoveryReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize report to YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write report file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &DiscoveryReport) -> Result<String, ReportError> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }
}

/// Serialize `report` and write it to `path`, replacing any existing file
pub fn write_report(
    report: &DiscoveryReport,
    path: &Path,
    format: OutputFormat,
) -> Result<(), ReportError> {
    info!(path = %path.display(), format = format.extension(), "Writing report");

    let body = OutputFormatter::new(format).format(report)?;
    fs::write(path, body).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
