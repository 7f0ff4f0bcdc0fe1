// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Key functionality:
// - Skips denylisted hosts (localhost and friends never answer in CI)
// - Balances the remaining URLs into waves (see balance.rs)
// - Sends one GET per URL, all URLs of a wave at once
// - Waits for the whole wave to settle, sleeps, then starts the next one
// - Detects failure modes (bad status, timeout, DNS, TLS, connection)
//
// The wave-by-wave loop is our backpressure: at most `max_wave_size`
// requests are ever in flight, and no two of them share a domain key.
//
// Redirects are NOT followed. A 3xx counts as success; whether the redirect
// target is alive is out of scope.
// =============================================================================

use super::balance::{balance, WaveQueue};
use crate::config::Config;
use crate::error::{CheckError, Result};
use crate::report::{CheckKind, FailureReason, UnreachableCause, ValidationResult};
use futures::future::join_all;
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, info, warn};

// Knobs for the remote phase, taken from Config
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    pub denied_hosts: Vec<String>,
    pub domain_key_length: usize,
    pub max_wave_size: usize,
    pub pacing_delay: Duration,
    pub request_timeout: Duration,
    /// Lower bound of the overall phase timeout
    pub phase_timeout: Duration,
}

impl From<&Config> for RemoteOptions {
    fn from(config: &Config) -> Self {
        Self {
            denied_hosts: config.denied_hosts.clone(),
            domain_key_length: config.domain_key_length,
            max_wave_size: config.max_wave_size,
            pacing_delay: config.pacing_delay(),
            request_timeout: config.request_timeout(),
            phase_timeout: Duration::from_secs(config.phase_timeout_secs),
        }
    }
}

impl RemoteOptions {
    // The floor, stretched when the waves' pacing alone would exceed it
    fn phase_timeout_for(&self, wave_count: usize) -> Duration {
        let pacing = self.pacing_delay * wave_count.saturating_sub(1) as u32;
        self.phase_timeout.max(pacing + self.request_timeout)
    }
}

// Results of the remote phase
#[derive(Debug, Default)]
pub struct RemoteReport {
    pub results: Vec<ValidationResult>,
    /// URLs on denylisted hosts; neither passed nor failed
    pub skipped: Vec<String>,
}

// Checks all external URLs
//
// Returns Err only for infrastructure problems (client cannot be built, a
// request cannot even be constructed, the phase runs out of time). Broken
// links are Ok results with a Fail outcome.
pub async fn check_urls(urls: &[String], options: &RemoteOptions) -> Result<RemoteReport> {
    let (testable, skipped): (Vec<String>, Vec<String>) = urls
        .iter()
        .cloned()
        .partition(|url| !is_denied_host(url, &options.denied_hosts));

    for url in &skipped {
        debug!("skipping denylisted host: {}", url);
    }

    let client = build_client(options.request_timeout)?;
    let queue = balance(&testable, options.domain_key_length, options.max_wave_size);
    let phase_timeout = options.phase_timeout_for(queue.remaining_waves());
    debug!(
        "{} url(s) in {} wave(s), phase timeout {:?}",
        testable.len(),
        queue.remaining_waves(),
        phase_timeout
    );

    let results = tokio::time::timeout(
        phase_timeout,
        run_waves(&client, queue, options.pacing_delay, testable.len()),
    )
    .await
    .map_err(|_| CheckError::RemoteTimeout(phase_timeout))??;

    Ok(RemoteReport { results, skipped })
}

// True if the URL (scheme stripped) starts with a denied host
pub fn is_denied_host(url: &str, denied_hosts: &[String]) -> bool {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    denied_hosts
        .iter()
        .any(|host| !host.is_empty() && without_scheme.starts_with(host.as_str()))
}

// Create an HTTP client shared by every request of the run
//
// Client is cheap to clone and pools connections internally
pub fn build_client(request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("doc-link-guardian/", env!("CARGO_PKG_VERSION")))
        .timeout(request_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(CheckError::Client)
}

// Drains the queue one wave at a time
//
// Wave N+1 is not sent before every request of wave N has settled.
pub async fn run_waves(
    client: &Client,
    mut queue: WaveQueue,
    pacing_delay: Duration,
    total: usize,
) -> Result<Vec<ValidationResult>> {
    let mut results = Vec::with_capacity(total);
    // 1-based position of the first URL of the current wave
    let mut counter = 1;

    while let Some(wave) = queue.next_wave() {
        let checks = wave
            .iter()
            .enumerate()
            .map(|(offset, url)| check_single_link(client, url, counter + offset, total));

        for result in join_all(checks).await {
            results.push(result?);
        }
        counter += wave.len();

        if !queue.is_empty() {
            debug!("---");
            tokio::time::sleep(pacing_delay).await;
        }
    }

    Ok(results)
}

// Checks a single URL and logs "<index>/<total>: <status> <url>"
async fn check_single_link(
    client: &Client,
    url: &str,
    index: usize,
    total: usize,
) -> Result<ValidationResult> {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let result = analyze_status(url, status);
            if result.is_ok() {
                info!("{}/{}: {} {}", index, total, status, url);
            } else {
                warn!("{}/{}: {} {}", index, total, status, url);
            }
            Ok(result)
        }
        // The request could not even be built: a bug, not a broken link
        Err(e) if e.is_builder() => Err(CheckError::Dispatch {
            url: url.to_string(),
            source: e,
        }),
        Err(e) => {
            let result = categorize_error(url, &e);
            if let Some(reason) = result.failure() {
                warn!("{}/{}: {} {}", index, total, reason, url);
            }
            Ok(result)
        }
    }
}

// Judges a status code: [200, 400) passes, anything else fails
pub fn analyze_status(url: &str, status: u16) -> ValidationResult {
    let result = if (200..400).contains(&status) {
        ValidationResult::pass(url, CheckKind::Remote)
    } else {
        ValidationResult::fail(url, CheckKind::Remote, FailureReason::RemoteBadStatus { status })
    };
    result.with_status(status)
}

// Categorizes transport errors from reqwest
//
// reqwest's Display only shows the outermost layer, so we look through the
// whole source chain for DNS and certificate hints.
fn categorize_error(url: &str, error: &reqwest::Error) -> ValidationResult {
    let chain = error_chain(error);
    let lower = chain.to_lowercase();

    let cause = if error.is_timeout() {
        UnreachableCause::Timeout
    } else if lower.contains("dns") || lower.contains("failed to lookup address") {
        UnreachableCause::Dns
    } else if lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl") {
        UnreachableCause::Tls
    } else if error.is_connect() {
        UnreachableCause::Connection
    } else {
        UnreachableCause::Other
    };

    ValidationResult::fail(
        url,
        CheckKind::Remote,
        FailureReason::RemoteUnreachable { cause, error: chain },
    )
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
