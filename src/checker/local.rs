// src/checker/local.rs
// =============================================================================
// Checks that local references point at real files.
//
// Each reference gets one `tokio::fs::metadata` call. All calls run
// concurrently; every call owns its own result slot, so nothing is shared
// between them. The batch as a whole is bounded by a short timeout: stat
// calls on a local tree should be near-instant, and a hang means something
// is wrong with the environment, not with a link.
//
// Outcomes per reference:
// - exists and is a regular file  -> Pass
// - NotFound                      -> Fail (LocalNotFound)
// - exists but is a directory etc -> Fail (NotAFile)
// - any other I/O error           -> the run aborts (CheckError::Filesystem)
// =============================================================================

use super::classify::LocalRef;
use crate::error::{CheckError, Result};
use crate::report::{CheckKind, FailureReason, ValidationResult};
use futures::future::join_all;
use std::io::ErrorKind;
use std::time::Duration;
use tracing::{info, warn};

// Checks every reference, results in input order
pub async fn check_local_files(
    refs: &[LocalRef],
    timeout: Duration,
) -> Result<Vec<ValidationResult>> {
    let checks = join_all(refs.iter().map(|local| check_single_file(local)));
    let results = tokio::time::timeout(timeout, checks)
        .await
        .map_err(|_| CheckError::LocalTimeout(timeout))?;
    results.into_iter().collect()
}

// Escaped references never reach the filesystem; they fail as is
pub fn escaped_results(refs: &[LocalRef]) -> Vec<ValidationResult> {
    refs.iter()
        .map(|local| {
            warn!(
                "{} (linked from {} as '{}') resolves outside the source root",
                local.path.display(),
                local.source_document.display(),
                local.target
            );
            ValidationResult::fail(
                local.path.display().to_string(),
                CheckKind::Containment,
                FailureReason::ClassificationEscape,
            )
        })
        .collect()
}

async fn check_single_file(local: &LocalRef) -> Result<ValidationResult> {
    let shown = local.path.display().to_string();

    match tokio::fs::metadata(&local.path).await {
        Ok(metadata) if metadata.is_file() => {
            info!("ok: {}", shown);
            Ok(ValidationResult::pass(shown, CheckKind::Existence))
        }
        Ok(_) => {
            warn!("not a file: {} (linked from {})", shown, local.source_document.display());
            Ok(ValidationResult::fail(shown, CheckKind::Existence, FailureReason::NotAFile))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("missing: {} (linked from {})", shown, local.source_document.display());
            Ok(ValidationResult::fail(
                shown,
                CheckKind::Existence,
                FailureReason::LocalNotFound { error: e.to_string() },
            ))
        }
        Err(source) => Err(CheckError::Filesystem {
            path: local.path.clone(),
            source,
        }),
    }
}
