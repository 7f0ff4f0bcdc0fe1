// src/report.rs
// =============================================================================
// Per-link results and the final report.
//
// Every checked item ends up as one ValidationResult. Broken links are data,
// not errors: validators keep going after a failure so that one run lists
// every broken link.
//
// Output formats:
// - a human-readable table (default)
// - JSON (--json), for CI tooling
// =============================================================================

use serde::Serialize;

// Which check produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Local reference stays inside the source root
    Containment,
    /// Local reference points at an existing file
    Existence,
    /// External URL answers with a good status
    Remote,
}

// Why a remote request never produced a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnreachableCause {
    Timeout,
    Dns,
    Tls,
    Connection,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    /// Local reference resolves outside the source root
    ClassificationEscape,
    LocalNotFound { error: String },
    /// Path exists but is a directory or something else
    NotAFile,
    RemoteBadStatus { status: u16 },
    RemoteUnreachable {
        cause: UnreachableCause,
        error: String,
    },
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::ClassificationEscape => write!(f, "resolves outside the source root"),
            FailureReason::LocalNotFound { error } => write!(f, "not found ({error})"),
            FailureReason::NotAFile => write!(f, "not a regular file"),
            FailureReason::RemoteBadStatus { status } => write!(f, "HTTP {status}"),
            FailureReason::RemoteUnreachable { cause, error } => {
                write!(f, "{cause:?}: {error}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Path or URL that was checked
    pub target: String,
    pub check: CheckKind,
    /// HTTP status when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ValidationResult {
    pub fn pass(target: impl Into<String>, check: CheckKind) -> Self {
        Self {
            target: target.into(),
            check,
            status: None,
            outcome: Outcome::Pass,
        }
    }

    pub fn fail(target: impl Into<String>, check: CheckKind, reason: FailureReason) -> Self {
        Self {
            target: target.into(),
            check,
            status: None,
            outcome: Outcome::Fail(reason),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Pass)
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.outcome {
            Outcome::Pass => None,
            Outcome::Fail(reason) => Some(reason),
        }
    }
}

// Everything a run checked
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub results: Vec<ValidationResult>,
    /// External URLs skipped because their host is denylisted
    pub skipped: Vec<String>,
}

impl Report {
    pub fn extend(&mut self, results: impl IntoIterator<Item = ValidationResult>) {
        self.results.extend(results);
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    // A run passes only when nothing failed anywhere
    pub fn passed(&self) -> bool {
        self.failure_count() == 0
    }

    pub fn count(&self, check: CheckKind) -> usize {
        self.results.iter().filter(|r| r.check == check).count()
    }
}

// Prints the report either as a table or JSON
pub fn print_report(report: &Report, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_table(report);
    }
    Ok(())
}

// Only failures get a row; passes were already logged one by one
fn print_table(report: &Report) {
    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!("{:<60} {:<12} {:<30}", "TARGET", "CHECK", "REASON");
        println!("{}", "=".repeat(102));
        for result in &failures {
            let reason = result.failure().map(ToString::to_string).unwrap_or_default();
            println!(
                "{:<60} {:<12} {:<30}",
                truncate(&result.target, 57),
                format_check(result.check),
                reason
            );
        }
        println!();
    }

    println!("📊 Summary:");
    let local = report.count(CheckKind::Existence) + report.count(CheckKind::Containment);
    println!("   📁 Local checks: {}", local);
    println!("   🌐 Remote checks: {}", report.count(CheckKind::Remote));
    println!("   ⏭️  Skipped hosts: {}", report.skipped.len());
    println!("   ✅ OK: {}", report.results.len() - failures.len());
    println!("   ❌ Broken: {}", failures.len());
}

fn format_check(check: CheckKind) -> &'static str {
    match check {
        CheckKind::Containment => "CONTAINMENT",
        CheckKind::Existence => "EXISTENCE",
        CheckKind::Remote => "REMOTE",
    }
}

// Truncate on a char boundary so multi-byte URLs don't panic
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
