//! # Check Report
//!
//! Combines pipeline statuses and the scan report into a [`Report`], renders
//! it and hands it to a publisher.
//!
//! ## Example
//!
//! ```no_run
//! use check_comment::{ApiPublisher, ContextOverrides, ReportConfig, ReportFormatter, RunContext};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ReportConfig::from_inputs(Some("success"), Some("failure"), None, Path::new("."));
//! let context = RunContext::from_actions_env(&ContextOverrides::default())?;
//! let publisher = ApiPublisher::new("ghp_token", "https://api.github.com")?;
//!
//! ReportFormatter::new(config).run(&context, &publisher).await?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::context::RunContext;
use crate::error::ReportError;
use crate::outcome::{CheckKind, CheckResult, Outcome};
use crate::publish::CommentPublisher;
use crate::render::render_comment;
use crate::scan::{ScanReport, SeverityCounts, SCAN_FILE_NAME};
use crate::scope::ChangedScope;

/// Inputs for one report, resolved at the process boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Outcome of the format step
    pub fmt_status: Outcome,

    /// Outcome of the validate step
    pub validate_status: Outcome,

    /// Stacks touched by the change
    pub changed_stacks: ChangedScope,

    /// Location of the scan output
    pub scan_file: PathBuf,
}

impl ReportConfig {
    /// Build a config from raw inputs.
    ///
    /// Absent or empty statuses default to success; the scan file is
    /// `<workspace>/trivy_output.txt`.
    pub fn from_inputs(
        fmt_status: Option<&str>,
        validate_status: Option<&str>,
        changed_stacks: Option<&str>,
        workspace: &Path,
    ) -> Self {
        Self {
            fmt_status: Outcome::from_input(fmt_status),
            validate_status: Outcome::from_input(validate_status),
            changed_stacks: ChangedScope::parse(changed_stacks.unwrap_or_default()),
            scan_file: workspace.join(SCAN_FILE_NAME),
        }
    }

    /// Read the scan output from `path` instead of the workspace default
    pub fn with_scan_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_file = path.into();
        self
    }
}

/// Everything the comment shows, computed once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    format: CheckResult,
    validate: CheckResult,
    scan: CheckResult,
    scan_report: ScanReport,
    changed_stacks: ChangedScope,
}

impl Report {
    /// Combine pipeline statuses with the scan report.
    ///
    /// The security-scan outcome always comes from the scan counts.
    pub fn build(config: &ReportConfig, scan_report: ScanReport) -> Self {
        Self {
            format: CheckResult::new(CheckKind::Format, config.fmt_status),
            validate: CheckResult::new(CheckKind::Validate, config.validate_status),
            scan: CheckResult::new(CheckKind::SecurityScan, scan_report.outcome()),
            scan_report,
            changed_stacks: config.changed_stacks.clone(),
        }
    }

    /// Format, validate and scan all succeeded
    pub const fn all_passed(&self) -> bool {
        self.format.outcome.is_success()
            && self.validate.outcome.is_success()
            && self.scan.outcome.is_success()
    }

    /// The three checks in table order
    pub const fn checks(&self) -> [CheckResult; 3] {
        [self.format, self.validate, self.scan]
    }

    pub const fn scan_report(&self) -> &ScanReport {
        &self.scan_report
    }

    pub const fn changed_stacks(&self) -> &ChangedScope {
        &self.changed_stacks
    }

    /// Serializable view for `--format json`
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            all_passed: self.all_passed(),
            checks: self.checks().to_vec(),
            issues: self.scan_report.counts(),
            changed_stacks: self.changed_stacks.clone(),
        }
    }
}

/// Machine-readable summary of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub issues: SeverityCounts,
    pub changed_stacks: ChangedScope,
}

/// Builds the check report and posts it as a single comment
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    config: ReportConfig,
}

impl ReportFormatter {
    pub const fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Load the scan file and build the report
    pub fn prepare(&self) -> Result<Report, ReportError> {
        let scan_report = ScanReport::load(&self.config.scan_file)?;
        Ok(Report::build(&self.config, scan_report))
    }

    /// Render the comment body without publishing it
    pub fn render(&self, context: &RunContext) -> Result<String, ReportError> {
        let report = self.prepare()?;
        Ok(render_comment(&report, context))
    }

    /// Build, render and publish the comment. Returns the posted body.
    ///
    /// The body is fully rendered before the single publish call.
    pub async fn run(
        &self,
        context: &RunContext,
        publisher: &dyn CommentPublisher,
    ) -> Result<String, ReportError> {
        let report = self.prepare()?;
        let body = render_comment(&report, context);

        info!(
            owner = %context.owner,
            repo = %context.repo,
            issue = context.issue_number,
            all_passed = report.all_passed(),
            "Publishing check results"
        );

        publisher
            .create_comment(&context.owner, &context.repo, context.issue_number, &body)
            .await?;

        Ok(body)
    }
}
