//! CLI tests for dry-run output.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("check-comment").unwrap();
    cmd.env_clear()
        .env("GITHUB_WORKSPACE", workspace.path())
        .env("GITHUB_REPOSITORY", "acme/infra-live")
        .env("GITHUB_ACTOR", "octocat")
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_WORKFLOW", "Terragrunt Checks");
    cmd
}

#[test]
fn dry_run_prints_comment() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .env("FMT_STATUS", "failure")
        .env("CHANGED_STACKS", "live/dev/vpc\n\nlive/dev/eks")
        .args(["--dry-run", "--pr", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🔴 **Some checks failed**"))
        .stdout(predicate::str::contains("| 🖌 **HCL Format** | ❌ failure |"))
        .stdout(predicate::str::contains("`live/dev/vpc`, `live/dev/eks`"))
        .stdout(predicate::str::contains("Pusher: @octocat"));
}

#[test]
fn dry_run_reads_pr_from_event_payload() {
    let workspace = TempDir::new().unwrap();
    let event = workspace.path().join("event.json");
    std::fs::write(&event, r#"{"pull_request": {"number": 9}}"#).unwrap();

    cmd(&workspace)
        .env("GITHUB_EVENT_PATH", &event)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ **All checks passed!**"));
}

#[test]
fn dry_run_preview_needs_no_pr_number() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("## 🔍 Terragrunt Check Results"))
        .stdout(predicate::str::contains("Workflow: `Terragrunt Checks`"));
}

#[test]
fn repo_flag_replaces_environment() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .env_remove("GITHUB_REPOSITORY")
        .args(["--repo", "acme/infra-live", "--pr", "5", "--publisher", "api"])
        .assert()
        .failure()
        // Context resolved from --repo; the run only stops at the missing token.
        .stderr(predicate::str::contains("GITHUB_TOKEN"))
        .stderr(predicate::str::contains("GITHUB_REPOSITORY").not());
}

#[test]
fn missing_repo_is_reported() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .env_remove("GITHUB_REPOSITORY")
        .args(["--pr", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_REPOSITORY is not set"));
}

#[test]
fn invalid_repo_flag_is_rejected() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .args(["--repo", "infra-live", "--dry-run", "--pr", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 'owner/repo'"));
}

#[test]
fn empty_status_defaults_to_success() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .env("FMT_STATUS", "")
        .env("VALIDATE_STATUS", "")
        .args(["--dry-run", "--pr", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ **All checks passed!**"));
}

#[test]
fn json_summary() {
    let workspace = TempDir::new().unwrap();
    std::fs::write(
        workspace.path().join("trivy_output.txt"),
        "AVD-AWS-0088 (HIGH): unencrypted bucket\n",
    )
    .unwrap();

    let output = cmd(&workspace)
        .args(["--dry-run", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["all_passed"], false);
    assert_eq!(summary["issues"]["high"], 1);
    assert_eq!(summary["checks"][2]["outcome"], "failure");
}

#[test]
fn unreadable_scan_file_fails() {
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir(workspace.path().join("trivy_output.txt")).unwrap();

    cmd(&workspace)
        .args(["--dry-run", "--pr", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read scan report"));
}

#[test]
fn api_publisher_requires_token() {
    let workspace = TempDir::new().unwrap();

    cmd(&workspace)
        .args(["--pr", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}
