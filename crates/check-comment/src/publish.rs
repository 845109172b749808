//! # Comment Publishers
//!
//! Post a comment body to a GitHub issue or pull request, either through the
//! REST API or by shelling out to the `gh` CLI.
//!
//! ## Example
//!
//! ```no_run
//! use check_comment::{ApiPublisher, CommentPublisher};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let publisher = ApiPublisher::new("ghp_token", "https://api.github.com")?;
//! publisher.create_comment("acme", "infra-live", 42, "Hello!").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::PublishError;

/// Default GitHub REST endpoint
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Something that can post a new comment on an issue or pull request.
#[async_trait]
pub trait CommentPublisher: Send + Sync {
    /// Create a comment with `body` on `owner/repo#issue_number`.
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), PublishError>;
}

#[derive(Debug, Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

/// Publisher backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct ApiPublisher {
    client: reqwest::Client,
    token: String,
    api_url: String,
}

impl ApiPublisher {
    /// Create a REST publisher.
    ///
    /// `api_url` is the API root, e.g. `https://api.github.com` or a GHES
    /// `https://ghe.example.com/api/v3`.
    pub fn new(token: &str, api_url: &str) -> Result<Self, PublishError> {
        if token.is_empty() {
            return Err(PublishError::NotConfigured(
                "GITHUB_TOKEN is required for the api publisher".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("check-comment/1.0"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token: token.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CommentPublisher for ApiPublisher {
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), PublishError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/issues/{issue_number}/comments",
            self.api_url
        );
        debug!(%url, body_len = body.len(), "Posting PR comment");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&CreateCommentRequest { body })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(owner, repo, issue = issue_number, "Posted comment to PR");
        Ok(())
    }
}

/// Publisher that shells out to `gh pr comment --body-file -`
#[derive(Debug, Clone)]
pub struct GhCliPublisher {
    program: String,
}

impl Default for GhCliPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl GhCliPublisher {
    pub fn new() -> Self {
        Self {
            program: "gh".to_string(),
        }
    }

    /// Use a different executable in place of `gh`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl CommentPublisher for GhCliPublisher {
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), PublishError> {
        debug!(
            pr = issue_number,
            body_len = body.len(),
            "Posting PR comment via gh"
        );

        let mut child = Command::new(&self.program)
            .args([
                "pr",
                "comment",
                &issue_number.to_string(),
                "--repo",
                &format!("{owner}/{repo}"),
                "--body-file",
                "-",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(PublishError::Spawn)?;

        // Large bodies exceed the argv limit, so the body goes over stdin.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(body.as_bytes()).await {
                // gh exited before reading; its exit status carries the cause.
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(PublishError::Spawn(e));
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(PublishError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PublishError::Command(stderr.trim().to_string()));
        }

        info!(owner, repo, pr = issue_number, "Posted comment to PR");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_publisher_requires_token() {
        let err = ApiPublisher::new("", GITHUB_API_URL).unwrap_err();
        assert!(matches!(err, PublishError::NotConfigured(_)));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let publisher = ApiPublisher::new("token", "https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(publisher.api_url, "https://ghe.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_gh_missing_binary_is_spawn_error() {
        let publisher = GhCliPublisher::with_program("definitely-not-a-real-gh-binary");
        let err = publisher
            .create_comment("acme", "infra-live", 1, "body")
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Spawn(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_gh_failure_exit_is_command_error() {
        let publisher = GhCliPublisher::with_program("false");
        let err = publisher
            .create_comment("acme", "infra-live", 1, "body")
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Command(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_gh_body_is_sent_on_stdin() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("gh");
        let args_file = dir.path().join("args.txt");
        let body_file = dir.path().join("body.txt");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\ncat > '{}'\n",
                args_file.display(),
                body_file.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Larger than a single argv entry may be on Linux (128 KiB).
        let body = "AVD-AWS-0086 (CRITICAL): public bucket\n".repeat(8_000);
        let publisher = GhCliPublisher::with_program(script.to_string_lossy());
        publisher
            .create_comment("acme", "infra-live", 42, &body)
            .await
            .unwrap();

        let args: Vec<String> = std::fs::read_to_string(&args_file)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(
            args,
            ["pr", "comment", "42", "--repo", "acme/infra-live", "--body-file", "-"]
        );
        assert_eq!(std::fs::read_to_string(&body_file).unwrap(), body);
    }
}
