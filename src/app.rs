// Declare modules
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod models;
pub mod patterns;
pub mod scanner;

use anyhow::{bail, Context, Result};

use self::cli::Cli;
use self::config::resolve_config;
use self::models::{FilterConfig, RunCounters};
use self::scanner::create_summary;

/// Resolves configuration, writes the summary and reports the counters.
pub fn run(args: Cli) -> Result<()> {
    let config = resolve_config(args)?;

    log_filter(&config.filter);
    log::info!("Starting summary creation. Output file: {}", config.output.display());

    let counters = create_summary(&config.root, &config.output, config.filter.clone())
        .context("Summary creation failed")?;

    print_report(&config.output.display().to_string(), &config.filter, &counters);
    if counters.output_incomplete {
        bail!(
            "Summary file {} may be incomplete: writing it out failed",
            config.output.display()
        );
    }
    Ok(())
}

fn log_filter(filter: &FilterConfig) {
    if filter.inclusion_mode_active {
        log::info!(
            "Inclusion mode active. Dirs: {:?}, files: {:?}, patterns: {:?}",
            sorted(&filter.include_dirs),
            sorted(&filter.include_files),
            filter.include_patterns
        );
    }
    log::info!("Excluding directories directly matching: {:?}", sorted(&filter.exclude_dirs));
    log::info!("Excluding files directly matching: {:?}", sorted(&filter.exclude_files));
    log::info!("Excluding paths matching patterns: {:?}", filter.exclude_patterns);
}

fn sorted(items: &std::collections::HashSet<String>) -> Vec<&String> {
    let mut items: Vec<&String> = items.iter().collect();
    items.sort();
    items
}

fn print_report(output: &str, filter: &FilterConfig, counters: &RunCounters) {
    println!("Summary creation complete: {}", output);
    println!("Processed {} text files.", counters.files_processed);
    if filter.inclusion_mode_active {
        println!(
            "Considered {} files based on include rules.",
            counters.files_considered
        );
    }
    println!(
        "Skipped {} files (excluded, non-matching include, binary, or errors).",
        counters.files_skipped()
    );
    if counters.skipped_excluded > 0 {
        println!(
            "({} files matched explicit exclude rules/patterns).",
            counters.skipped_excluded
        );
    }
    if counters.skipped_errors > 0 {
        println!("({} files could not be read or written).", counters.skipped_errors);
    }
    if counters.dirs_pruned > 0 {
        println!(
            "Skipped descending into {} excluded directory trees.",
            counters.dirs_pruned
        );
    }

    if counters.files_processed == 0 {
        log::warn!("⚠️ No content found for the specified criteria.");
    }
}
