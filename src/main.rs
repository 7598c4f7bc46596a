//! BucketCopy CLI - Concurrent File Sorter
//!
//! Sorts a directory tree into per-extension buckets, one concurrent copy
//! unit per file.

use bucketcopy::config::{CliArgs, SortConfig};
use bucketcopy::core::SortEngine;
use bucketcopy::error::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging; per-copy lines are INFO so default to that level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = SortConfig::from_cli(&args)
        .map_err(bucketcopy::error::BucketCopyError::ConfigError)?;

    // Invalid source short-circuits the run before any output mutation and
    // is reported as a log line, not an exit code.
    if !config.source.exists() || !config.source.is_dir() {
        tracing::error!(
            "Source folder '{}' does not exist or is not a directory",
            config.source.display()
        );
        return Ok(());
    }

    if args.verbose > 0 {
        print_config(&config);
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| bucketcopy::error::BucketCopyError::config(format!(
            "Failed to create runtime: {}",
            e
        )))?;

    // Per-file failures are already absorbed into the report; only a scan
    // failure propagates out of execute and produces a non-zero exit.
    let engine = SortEngine::new(config);
    let report = rt.block_on(engine.execute())?;

    if args.verbose > 0 && !args.quiet {
        report.print_summary();
    }

    Ok(())
}

fn print_config(config: &SortConfig) {
    println!("=== Configuration ===");
    println!("Source:        {:?}", config.source);
    println!("Output:        {:?}", config.output);
    println!(
        "Max in-flight: {}",
        if config.max_in_flight == 0 {
            "unbounded".to_string()
        } else {
            config.max_in_flight.to_string()
        }
    );
    println!("Collision:     {:?}", config.collision);
    println!(
        "Buffer:        {}",
        humansize::format_size(config.buffer_size as u64, humansize::BINARY)
    );
    println!("Preserve:      {}", config.preserve);
    println!();
}
