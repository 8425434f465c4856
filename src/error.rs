//! Error types for report generation.
//!
//! All failures are terminal for the current run: a partially aggregated
//! report would misrepresent pass/fail totals, so nothing is retried and
//! no best-effort output is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The results directory is required (fail-on-empty) but missing.
    #[error("Test results directory does not exist: {path}")]
    Configuration { path: PathBuf },

    /// The walk completed without finding a single test result file,
    /// and fail-on-empty was requested.
    #[error("No test XML results found to generate an HTML report from")]
    EmptyResults,

    /// A candidate file was not valid test-result XML.
    #[error("Failed to parse test results from '{origin}': {reason}")]
    Parse { origin: String, reason: String },

    /// Filesystem failure while reading results or writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Shorthand used by the XML reader.
    pub fn parse(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::Parse {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}
