//! HashVerify CLI - File Integrity Checker
//!
//! Prints exactly one line on stdout: the verdict, or the error that
//! stopped the check. Logs go to stderr.

use clap::Parser;
use hashverify::config::{validate, CheckConfig, CliArgs};
use hashverify::core::{CheckReport, IntegrityChecker};
use hashverify::error::Result;
use hashverify::system::detect_host_parallelism;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when the digests differ
const EXIT_MISMATCH: i32 = 1;

/// Exit status for configuration, validation and I/O errors
const EXIT_ERROR: i32 = 2;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Initialize logging
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Handle result
    match run(&args) {
        Ok(report) => {
            println!("{}", report.verdict);
            if !report.verdict.is_match() {
                std::process::exit(EXIT_MISMATCH);
            }
        }
        Err(e) => {
            if e.is_precondition() {
                debug!("check aborted before hashing");
            }
            println!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(args: &CliArgs) -> Result<CheckReport> {
    // Build configuration
    let config = CheckConfig::from_cli(args, detect_host_parallelism())?;

    if config.threads.was_clamped() {
        warn!(
            "requested {} threads, using {}",
            config.threads.requested.unwrap_or_default(),
            config.threads.workers
        );
    }

    validate(&config)?;

    let checker = IntegrityChecker::from_config(&config);
    let report = checker.check(&config.source, &config.comparison)?;

    info!(
        "{} {}  {}",
        config.algorithm,
        report.source_hash,
        config.source.display()
    );
    if let (Some(copy_hash), Some(copy)) = (&report.copy_hash, config.comparison.copy_file()) {
        info!("{} {}  {}", config.algorithm, copy_hash, copy.display());
    }

    Ok(report)
}
