//! Error types for report building and publishing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`CommentPublisher`](crate::CommentPublisher).
#[derive(Debug, Error)]
pub enum PublishError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The `gh` CLI could not be spawned
    #[error("Failed to execute gh CLI: {0}")]
    Spawn(#[source] std::io::Error),

    /// The `gh` CLI exited with a failure
    #[error("gh pr comment failed: {0}")]
    Command(String),

    /// Publisher is missing required configuration
    #[error("Publisher not configured: {0}")]
    NotConfigured(String),
}

/// Errors that abort a report invocation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The scan file exists but could not be read
    #[error("Failed to read scan report {}: {source}", path.display())]
    ScanRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Host context is missing or malformed
    #[error("Invalid run context: {0}")]
    Context(String),

    /// Event payload could not be parsed
    #[error("Failed to parse event payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Publishing the comment failed
    #[error(transparent)]
    Publish(#[from] PublishError),
}
