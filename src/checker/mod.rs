// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules, in pipeline order:
// - extract: pulls href/src targets out of rendered documents
// - classify: external URL vs local reference vs dropped
// - local: checks local references exist on disk
// - balance: spreads external URLs into domain-distinct waves
// - http: requests external URLs wave by wave
// =============================================================================

mod balance;
mod classify;
mod extract;
mod http;
mod local;

pub use balance::{balance, domain_key, group_by_domain, transpose, Wave, WaveQueue};
pub use classify::{
    classify, classify_links, decode_local_target, dedup_urls, Classification, ClassifiedLink,
    ClassifiedSet, LocalRef,
};
pub use extract::{extract_links, LinkKind, RawLink};
pub use http::{
    analyze_status, build_client, check_urls, is_denied_host, run_waves, RemoteOptions,
    RemoteReport,
};
pub use local::{check_local_files, escaped_results};
