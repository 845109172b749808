//! # Trivy Scan Report
//!
//! The pipeline tees `trivy config` output to `trivy_output.txt` in the
//! workspace. Findings are counted by their severity markers; nothing else
//! in the output is interpreted.

use regex::Regex;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::outcome::Outcome;

/// File name of the scan output inside the workspace
pub const SCAN_FILE_NAME: &str = "trivy_output.txt";

/// Shown when the scan file does not exist
pub const MISSING_PLACEHOLDER: &str = "No issues found or Trivy did not run";

/// Shown when the scan file exists but is blank
pub const EMPTY_PLACEHOLDER: &str = "No issues found";

static CRITICAL_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(CRITICAL\):").unwrap());
static HIGH_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(HIGH\):").unwrap());
static MEDIUM_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(MEDIUM\):").unwrap());

/// Severity counts from a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl SeverityCounts {
    /// Count markers in `text`. Each severity is an independent scan.
    pub fn count(text: &str) -> Self {
        Self {
            critical: CRITICAL_MARKER.find_iter(text).count(),
            high: HIGH_MARKER.find_iter(text).count(),
            medium: MEDIUM_MARKER.find_iter(text).count(),
        }
    }

    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium
    }

    /// Critical and high findings fail the scan; medium is informational.
    pub const fn blocking(&self) -> usize {
        self.critical + self.high
    }
}

impl std::fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} critical, {} high, {} medium",
            self.critical, self.high, self.medium
        )
    }
}

/// Scan output as displayed in the comment, plus its counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    text: String,
    counts: SeverityCounts,
}

impl ScanReport {
    /// Report used when the scanner produced no file
    pub fn missing() -> Self {
        Self {
            text: MISSING_PLACEHOLDER.to_string(),
            counts: SeverityCounts::default(),
        }
    }

    /// Build a report from raw scanner output
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim_end();
        if trimmed.is_empty() {
            return Self {
                text: EMPTY_PLACEHOLDER.to_string(),
                counts: SeverityCounts::default(),
            };
        }

        Self {
            text: trimmed.to_string(),
            counts: SeverityCounts::count(trimmed),
        }
    }

    /// Load the report from `path`.
    ///
    /// A missing file yields [`ScanReport::missing`]. Any other read error
    /// is returned. Invalid UTF-8 is replaced, not rejected.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        match std::fs::read(path) {
            Ok(bytes) => {
                let report = Self::from_text(&String::from_utf8_lossy(&bytes));
                info!(
                    path = %path.display(),
                    critical = report.counts.critical,
                    high = report.counts.high,
                    medium = report.counts.medium,
                    "Loaded scan report"
                );
                Ok(report)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No scan report found");
                Ok(Self::missing())
            }
            Err(source) => Err(ReportError::ScanRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn counts(&self) -> SeverityCounts {
        self.counts
    }

    /// Scan outcome derived from the counts
    pub const fn outcome(&self) -> Outcome {
        if self.counts.blocking() > 0 {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }
}
