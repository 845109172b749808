//! # Run Context
//!
//! Identifies who triggered the pipeline and which pull request the comment
//! belongs to. Loaded once from the GitHub Actions environment.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::ReportError;

/// Host-supplied details about the current workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// User that triggered the run (`GITHUB_ACTOR`)
    pub actor: String,

    /// Triggering event, e.g. `pull_request` (`GITHUB_EVENT_NAME`)
    pub event_name: String,

    /// Workflow name (`GITHUB_WORKFLOW`)
    pub workflow: String,

    /// Pull request or issue number
    pub issue_number: u64,

    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,
}

/// Subset of the webhook payload that carries the issue number
#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<NumberedItem>,
    #[serde(default)]
    issue: Option<NumberedItem>,
    #[serde(default)]
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct NumberedItem {
    number: u64,
}

/// Values given on the command line that take precedence over the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOverrides {
    /// `owner/repo`, in place of `GITHUB_REPOSITORY`
    pub repository: Option<String>,

    /// Issue number, in place of the event payload
    pub issue_number: Option<u64>,
}

impl RunContext {
    /// Load from the process environment for publishing.
    pub fn from_actions_env(overrides: &ContextOverrides) -> Result<Self, ReportError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load from the process environment for a local preview.
    ///
    /// Same as [`RunContext::from_actions_env`] except the issue number is
    /// optional and falls back to 0; the rendered body does not show it.
    pub fn preview_from_actions_env(overrides: &ContextOverrides) -> Result<Self, ReportError> {
        Self::preview_from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load using `lookup` to resolve variables. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F, overrides: &ContextOverrides) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(&lookup, overrides, true)
    }

    /// Preview variant of [`RunContext::from_lookup`]
    pub fn preview_from_lookup<F>(
        lookup: F,
        overrides: &ContextOverrides,
    ) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(&lookup, overrides, false)
    }

    fn resolve<F>(
        lookup: &F,
        overrides: &ContextOverrides,
        issue_required: bool,
    ) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| ReportError::Context(format!("{key} is not set")));

        let repository = match overrides.repository.as_deref().filter(|v| !v.is_empty()) {
            Some(repository) => repository.to_string(),
            None => require("GITHUB_REPOSITORY")?,
        };
        let (owner, repo) = parse_repo(&repository)?;

        let issue_number = match (overrides.issue_number, get("GITHUB_EVENT_PATH")) {
            (Some(n), _) => n,
            (None, Some(event_path)) => issue_number_from_event(Path::new(&event_path))?,
            (None, None) if issue_required => {
                return Err(ReportError::Context(
                    "GITHUB_EVENT_PATH is not set and no issue number was given".to_string(),
                ))
            }
            (None, None) => 0,
        };

        let context = Self {
            actor: require("GITHUB_ACTOR")?,
            event_name: require("GITHUB_EVENT_NAME")?,
            workflow: require("GITHUB_WORKFLOW")?,
            issue_number,
            owner: owner.to_string(),
            repo: repo.to_string(),
        };

        debug!(
            owner = %context.owner,
            repo = %context.repo,
            issue = context.issue_number,
            "Resolved run context"
        );
        Ok(context)
    }
}

/// Read the issue number from a webhook event payload file
pub fn issue_number_from_event(path: &Path) -> Result<u64, ReportError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ReportError::Context(format!(
            "failed to read event payload {}: {e}",
            path.display()
        ))
    })?;
    issue_number_from_payload(&raw)
}

/// Extract the issue number from a webhook payload body.
///
/// Looks at `pull_request.number`, then `issue.number`, then `number`.
pub fn issue_number_from_payload(raw: &str) -> Result<u64, ReportError> {
    let payload: EventPayload = serde_json::from_str(raw)?;
    payload
        .pull_request
        .map(|pr| pr.number)
        .or_else(|| payload.issue.map(|issue| issue.number))
        .or(payload.number)
        .ok_or_else(|| {
            ReportError::Context("event payload has no pull request or issue number".to_string())
        })
}

/// Parse repository string "owner/repo" into tuple
pub fn parse_repo(repo_str: &str) -> Result<(&str, &str), ReportError> {
    match repo_str.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(ReportError::Context(format!(
            "invalid repository format, expected 'owner/repo', got: {repo_str}"
        ))),
    }
}
