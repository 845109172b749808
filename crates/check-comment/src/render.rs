//! Markdown rendering for the check results comment.
//!
//! Rendering is pure: the same report and context always produce the same
//! bytes.

use std::fmt::Write;

use crate::context::RunContext;
use crate::outcome::{CheckKind, CheckResult};
use crate::report::Report;

const TITLE: &str = "## 🔍 Terragrunt Check Results";
const PASSED_BANNER: &str = "✅ **All checks passed!**";
const FAILED_BANNER: &str = "🔴 **Some checks failed**";
const HCL_SCOPE: &str = "All HCL files";
const PLAN_NOTE: &str = "💡 **Note:** Terragrunt plan is disabled. \
To enable, configure AWS OIDC credentials in the workflow.";

/// Render the full comment body
pub fn render_comment(report: &Report, context: &RunContext) -> String {
    let mut md = String::new();
    let counts = report.scan_report().counts();

    let _ = writeln!(md, "{TITLE}\n");
    let _ = writeln!(md, "### 📊 Summary");
    let banner = if report.all_passed() {
        PASSED_BANNER
    } else {
        FAILED_BANNER
    };
    let _ = writeln!(md, "{banner}\n");

    let _ = writeln!(md, "| Check | Status | Issues | Scope |");
    let _ = writeln!(md, "|-------|--------|--------|-------|");
    for check in report.checks() {
        let (issues, scope) = match check.name {
            CheckKind::SecurityScan => (counts.to_string(), report.changed_stacks().to_string()),
            CheckKind::Format | CheckKind::Validate => ("-".to_string(), HCL_SCOPE.to_string()),
        };
        let _ = writeln!(md, "{}", table_row(check, &issues, &scope));
    }
    md.push('\n');

    let _ = writeln!(md, "---\n");
    let _ = writeln!(md, "<details>");
    let _ = writeln!(
        md,
        "<summary>🔒 Trivy Security Details ({} issue(s))</summary>\n",
        counts.total()
    );
    let _ = writeln!(md, "```");
    let _ = writeln!(md, "{}", report.scan_report().text());
    let _ = writeln!(md, "```");
    let _ = writeln!(md, "</details>\n");

    let _ = writeln!(md, "---");
    let _ = writeln!(md, "{PLAN_NOTE}\n");

    let _ = writeln!(md, "---");
    let _ = write!(
        md,
        "<sub>👤 Pusher: @{} | 🔄 Action: `{}` | ⚙️ Workflow: `{}`</sub>",
        context.actor, context.event_name, context.workflow
    );

    md
}

fn table_row(check: CheckResult, issues: &str, scope: &str) -> String {
    format!(
        "| {} | {} {} | {issues} | {scope} |",
        check.name.label(),
        check.outcome.icon(),
        check.outcome
    )
}
