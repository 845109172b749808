//! CLI for posting check results to a pull request
//!
//! Run `check-comment --help` for usage information.

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use anyhow::{Context, Result};
use check_comment::{
    ApiPublisher, CommentPublisher, ContextOverrides, GhCliPublisher, ReportConfig,
    ReportFormatter, RunContext, GITHUB_API_URL,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "check-comment")]
#[command(about = "Post Terragrunt check results as a PR comment")]
#[command(version)]
struct Cli {
    /// Outcome of the format step
    #[arg(long, env = "FMT_STATUS")]
    fmt_status: Option<String>,

    /// Outcome of the validate step
    #[arg(long, env = "VALIDATE_STATUS")]
    validate_status: Option<String>,

    /// Newline-separated list of changed stacks
    #[arg(long, env = "CHANGED_STACKS")]
    changed_stacks: Option<String>,

    /// Workspace directory containing trivy_output.txt
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: PathBuf,

    /// Read the scan output from this file instead of the workspace
    #[arg(long)]
    scan_file: Option<PathBuf>,

    /// Repository in owner/repo format
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// Pull request number (defaults to the event payload)
    #[arg(long)]
    pr: Option<u64>,

    /// Token for the api publisher
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_URL)]
    api_url: String,

    /// How to post the comment
    #[arg(long, value_enum, default_value = "api")]
    publisher: PublisherKind,

    /// Print the comment instead of posting it
    #[arg(short, long)]
    dry_run: bool,

    /// Output format for dry runs: text, json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum PublisherKind {
    /// GitHub REST API with GITHUB_TOKEN
    #[default]
    Api,
    /// The `gh` CLI
    Gh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = ReportConfig::from_inputs(
        cli.fmt_status.as_deref(),
        cli.validate_status.as_deref(),
        cli.changed_stacks.as_deref(),
        &cli.workspace,
    );
    if let Some(path) = &cli.scan_file {
        config = config.with_scan_file(path);
    }
    let formatter = ReportFormatter::new(config);

    let overrides = ContextOverrides {
        repository: cli.repo.clone(),
        issue_number: cli.pr,
    };

    if cli.dry_run {
        return run_dry(&formatter, &overrides, cli.format);
    }

    let context =
        RunContext::from_actions_env(&overrides).context("Failed to resolve run context")?;
    let publisher: Box<dyn CommentPublisher> = match cli.publisher {
        PublisherKind::Api => Box::new(ApiPublisher::new(
            cli.token.as_deref().unwrap_or_default(),
            &cli.api_url,
        )?),
        PublisherKind::Gh => Box::new(GhCliPublisher::new()),
    };

    formatter
        .run(&context, publisher.as_ref())
        .await
        .with_context(|| format!("Failed to post check results to PR #{}", context.issue_number))?;

    println!(
        "✅ Posted check results to {}/{}#{}",
        context.owner, context.repo, context.issue_number
    );
    Ok(())
}

fn run_dry(
    formatter: &ReportFormatter,
    overrides: &ContextOverrides,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = formatter.prepare()?;
            println!("{}", serde_json::to_string_pretty(&report.summary())?);
        }
        OutputFormat::Text => {
            let context = RunContext::preview_from_actions_env(overrides)
                .context("Failed to resolve run context")?;
            println!("{}", formatter.render(&context)?);
        }
    }
    Ok(())
}
