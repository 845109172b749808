#![warn(clippy::pedantic)]
// =============================================================================
// Clippy Pedantic Lint Configuration
// =============================================================================

// -----------------------------------------------------------------------------
// Documentation
// -----------------------------------------------------------------------------
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
// -----------------------------------------------------------------------------
// API Design Choices
// -----------------------------------------------------------------------------
// Not all functions need #[must_use]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
// Allow module_name in type names for clarity in public API
#![allow(clippy::module_name_repetitions)]

//! # Check Comment
//!
//! Posts a pull request comment summarizing the Terragrunt format, validate
//! and Trivy checks of a CI run.
//!
//! ## Modules
//!
//! - [`outcome`] - Closed set of check outcomes
//! - [`scope`] - Changed stacks listed by the pipeline
//! - [`scan`] - Trivy output and severity counts
//! - [`report`] - Report assembly and the publish flow
//! - [`render`] - Markdown comment rendering
//! - [`context`] - Run context from the GitHub Actions environment
//! - [`publish`] - REST and `gh` CLI comment publishers
//! - [`error`] - Error types

pub mod context;
pub mod error;
pub mod outcome;
pub mod publish;
pub mod render;
pub mod report;
pub mod scan;
pub mod scope;

// Re-export key types for convenience
pub use context::{parse_repo, ContextOverrides, RunContext};
pub use error::{PublishError, ReportError};
pub use outcome::{CheckKind, CheckResult, Outcome};
pub use publish::{ApiPublisher, CommentPublisher, GhCliPublisher, GITHUB_API_URL};
pub use render::render_comment;
pub use report::{Report, ReportConfig, ReportFormatter, ReportSummary};
pub use scan::{ScanReport, SeverityCounts, SCAN_FILE_NAME};
pub use scope::ChangedScope;
