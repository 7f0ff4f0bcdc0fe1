// src/logger.rs
// =============================================================================
// Logging setup.
//
// One tracing subscriber for the whole run, writing to stderr in a compact
// human format or as JSON lines (--log-json). The filter comes from RUST_LOG
// when set, otherwise from --verbose.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_logger(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "doc_link_guardian=debug,info"
    } else {
        "doc_link_guardian=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer.compact()).init();
    }
}
