// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands share one set of options:
//   check   local references and external URLs
//   local   local references only (fast, no network)
//   remote  external URLs only
//
// Options given on the command line override the TOML config file, which
// overrides the built-in defaults.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use doc_link_guardian::{Config, Scope};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "doc-link-guardian",
    version,
    about = "Check local references and external URLs in markdown documentation",
    long_about = "doc-link-guardian renders your markdown sources, checks that every local \
                  reference points at an existing file inside the source tree, and that every \
                  external URL answers. External requests are spread over domains so no host \
                  sees a burst."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check local references and external URLs
    ///
    /// Example: doc-link-guardian check --root src
    Check(CommonArgs),

    /// Check local references only
    Local(CommonArgs),

    /// Check external URLs only
    Remote(CommonArgs),
}

impl Commands {
    pub fn scope(&self) -> Scope {
        match self {
            Commands::Check(_) => Scope::All,
            Commands::Local(_) => Scope::Local,
            Commands::Remote(_) => Scope::Remote,
        }
    }

    pub fn args(&self) -> &CommonArgs {
        match self {
            Commands::Check(args) | Commands::Local(args) | Commands::Remote(args) => args,
        }
    }
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// TOML config file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Source root holding the markdown files
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Maximum number of concurrent requests per wave
    #[arg(long)]
    pub max_wave_size: Option<usize>,

    /// Delay between waves, in milliseconds
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,

    /// Host prefix to skip (repeatable); replaces the configured list
    #[arg(long = "deny-host")]
    pub deny_hosts: Vec<String>,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl CommonArgs {
    // Layers the flags that were given on top of a config
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(root) = &self.root {
            config.source_root = root.clone();
        }
        if let Some(size) = self.max_wave_size {
            config.max_wave_size = size;
        }
        if let Some(ms) = self.pacing_ms {
            config.pacing_delay_ms = ms;
        }
        if let Some(secs) = self.request_timeout {
            config.request_timeout_secs = secs;
        }
        if !self.deny_hosts.is_empty() {
            config.denied_hosts = self.deny_hosts.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "doc-link-guardian",
            "remote",
            "--root",
            "docs",
            "--max-wave-size",
            "5",
            "--deny-host",
            "internal.example",
        ]);
        assert_eq!(cli.command.scope(), Scope::Remote);

        let config = cli.command.args().apply(Config::default());
        assert_eq!(config.source_root, PathBuf::from("docs"));
        assert_eq!(config.max_wave_size, 5);
        assert_eq!(config.denied_hosts, vec!["internal.example".to_string()]);
        assert_eq!(config.pacing_delay_ms, 1000);
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["doc-link-guardian", "check"]);
        let config = cli.command.args().apply(Config::default());
        assert_eq!(config, Config::default());
    }
}
