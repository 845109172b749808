//! # Check Outcomes
//!
//! Pipeline steps report their result as free-form strings (`steps.fmt.outcome`
//! in a workflow). This module folds those strings into a closed set so the
//! rest of the crate never compares raw text.

use serde::Serialize;

/// Outcome of a single pipeline check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Check passed
    Success,
    /// Check failed
    Failure,
    /// Check was skipped
    Skipped,
    /// Anything the pipeline reported that is not one of the above
    Unknown,
}

impl Outcome {
    /// Parse a status string. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "skipped" => Self::Skipped,
            _ => Self::Unknown,
        }
    }

    /// Parse an optional input, treating absent or empty values as success.
    pub fn from_input(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Success,
            Some(v) => Self::parse(v),
        }
    }

    /// Whether this outcome counts toward an overall pass.
    ///
    /// Only `Success` passes; a skipped check fails the summary.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Status icon shown in the results table
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failure => "❌",
            Self::Skipped => "⏭️",
            Self::Unknown => "❓",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Skipped => write!(f, "skipped"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which of the three reported checks a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// `terragrunt hclfmt --check`
    Format,
    /// `terragrunt hclvalidate`
    Validate,
    /// Trivy config scan
    SecurityScan,
}

impl CheckKind {
    /// Emoji and bold label for the table's first column
    pub const fn label(self) -> &'static str {
        match self {
            Self::Format => "🖌 **HCL Format**",
            Self::Validate => "🤖 **HCL Validate**",
            Self::SecurityScan => "🔒 **Trivy**",
        }
    }
}

/// Result of one check as shown in the comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: CheckKind,
    pub outcome: Outcome,
}

impl CheckResult {
    pub const fn new(name: CheckKind, outcome: Outcome) -> Self {
        Self { name, outcome }
    }
}
