// src/main.rs
// =============================================================================
// Entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the configuration (defaults -> TOML file -> flags)
// 3. Run the pipeline and print the report
// 4. Exit with proper code (0 = all links fine, 1 = broken links, 2 = error)
//
// The runtime is single-threaded on purpose: all concurrency here is waiting
// on I/O, and the wave loop relies on nothing else running in between.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use doc_link_guardian::{logger, pipeline, report, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = the run itself failed
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let args = cli.command.args();
    logger::init_logger(args.verbose, args.log_json);

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let config = args.apply(config);
    config.validate()?;

    if !args.json {
        println!("🔍 Checking links under {}", config.source_root.display());
    }

    let report = pipeline::run(&config, cli.command.scope())
        .await
        .context("link check aborted")?;

    report::print_report(&report, args.json)?;

    if report.passed() {
        Ok(0)
    } else {
        Ok(1)
    }
}
