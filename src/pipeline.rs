// src/pipeline.rs
// =============================================================================
// Wires the stages together:
//
//   discover -> render -> extract -> classify -> { local checks
//                                                { remote checks
//
// Rendering and extraction are synchronous and finish before the first
// await, so the parsed DOMs are gone by the time any I/O starts.
// =============================================================================

use crate::checker::{self, ClassifiedSet, RemoteOptions};
use crate::config::Config;
use crate::error::Result;
use crate::render;
use crate::report::Report;
use tracing::{debug, info};

// Which validators a run includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Local,
    Remote,
}

impl Scope {
    fn includes_local(self) -> bool {
        matches!(self, Scope::All | Scope::Local)
    }

    fn includes_remote(self) -> bool {
        matches!(self, Scope::All | Scope::Remote)
    }
}

// Finds, renders, extracts and classifies every link of the documentation
pub fn collect_links(config: &Config) -> Result<ClassifiedSet> {
    let paths = render::discover_documents(config)?;
    let documents = render::load_documents(&paths)?;
    let raw = checker::extract_links(&documents)?;
    let set = checker::classify_links(&raw, config);

    info!(
        "📄 {} document(s): {} link(s), {} unique external, {} local, {} escaping, {} ignored",
        documents.len(),
        raw.len(),
        set.external.len(),
        set.local.len(),
        set.escaped.len(),
        set.dropped
    );
    Ok(set)
}

// Runs the configured checks and gathers every result
pub async fn run(config: &Config, scope: Scope) -> Result<Report> {
    debug!("config: {:?}", config);
    let set = collect_links(config)?;
    let mut report = Report::default();

    if scope.includes_local() {
        report.extend(checker::escaped_results(&set.escaped));
        report.extend(checker::check_local_files(&set.local, config.local_timeout()).await?);
    }

    if scope.includes_remote() {
        let remote = checker::check_urls(&set.external, &RemoteOptions::from(config)).await?;
        report.extend(remote.results);
        report.skipped = remote.skipped;
    }

    Ok(report)
}
