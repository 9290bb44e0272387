mod args;
mod backup;
mod error;
mod replacer;
mod scanner;

use anyhow::{Context, Result};
use std::process;

/// Main entry point of the application
/// Handles argument parsing and executes the program with error handling
fn main() -> Result<()> {
    // Parse command line arguments
    let config = args::parse().context("Failed to parse arguments")?;

    // Execute the program
    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    Ok(())
}

/// Runs the replacement over every candidate file
///
/// The candidate list is fully materialized before the first file is
/// touched, and files are processed strictly one after another: read,
/// backup when overwriting, write. The first failure ends the run.
///
/// # Arguments
/// * `config` - Validated invocation configuration
fn run(config: &args::Config) -> Result<()> {
    let candidates = scanner::collect(
        &config.target,
        config.recursive,
        config.extensions.as_ref(),
        config.name_match.as_ref(),
    )?;

    // One backup session per invocation; its directory only materializes
    // if an in-place rewrite actually happens.
    let mut session = backup::BackupSession::new();
    let mut outcomes = Vec::with_capacity(candidates.len());

    for path in &candidates {
        let outcome = replacer::replace_in_file(
            path,
            &config.from,
            &config.to,
            config.overwrite,
            &mut session,
        )?;

        if config.verbose {
            println!(
                "{} -> {}",
                outcome.path.display(),
                outcome.output_path.display()
            );
        }

        outcomes.push(outcome);
    }

    if config.verbose && config.overwrite && !outcomes.is_empty() {
        println!("Originals preserved under {}", session.root().display());
    }

    report(config, &outcomes);

    Ok(())
}

/// Summarize the run for the operator
fn report(config: &args::Config, outcomes: &[replacer::ReplaceOutcome]) {
    if outcomes.is_empty() {
        eprintln!("Warning: no files matched under {:?}", config.target);
        return;
    }

    let changed = outcomes.iter().filter(|o| o.changed).count();
    if changed == 0 {
        eprintln!(
            "Warning: no replacements were made. Check if the pattern exists in the files."
        );
    } else if config.verbose {
        let before: u64 = outcomes.iter().map(|o| o.bytes_original).sum();
        let after: u64 = outcomes.iter().map(|o| o.bytes_replaced).sum();
        println!(
            "Replaced in {} of {} files ({} -> {} bytes)",
            changed,
            outcomes.len(),
            before,
            after
        );
    }
}
