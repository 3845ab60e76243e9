//! skipcopy CLI entry point.
//!
//! Copies the targets named in a config file, skipping every target whose
//! destination already holds identical content.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;

use std::env;
use std::path::Path;

use clap::Parser;

use args::Args;
use progress::BatchBar;
use skipcopy_config::{LoadedConfig, discover_config, load_config};
use skipcopy_operations::{
    BatchResult, CopyAllOptions, PrimitiveCopier, copy_all_with_progress, plan_targets,
};

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Main application logic.
///
/// Returns whether every processed target was copied or skipped.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;

    let config_path = match &args.config {
        Some(path) => cwd.join(path),
        None => discover_config(&cwd)?,
    };
    let mut loaded = load_config(&config_path)?;
    apply_root_overrides(&mut loaded, args, &cwd);

    let source_root = loaded.source_root();
    let destination_root = loaded.destination_root();
    let options = batch_options(&loaded, args);

    if !options.quiet {
        output::print_header("skipcopy");
        output::print_config_info(
            &config_path.to_string_lossy(),
            &source_root.to_string_lossy(),
            &destination_root.to_string_lossy(),
        );
    }

    let targets = plan_targets(&loaded)?;
    if targets.is_empty() {
        output::print_warning("No targets to copy.");
        return Ok(true);
    }

    let bar = BatchBar::new(targets.len(), args.should_show_progress() && !options.quiet);
    let result = copy_all_with_progress(
        &PrimitiveCopier,
        &source_root,
        &destination_root,
        &targets,
        &options,
        |progress| bar.update(progress),
    );
    bar.clear();
    let result = result?;

    print_result(&result, &destination_root, options.quiet);

    Ok(result.is_success())
}

/// Replace the config's roots with the ones given on the command line.
fn apply_root_overrides(loaded: &mut LoadedConfig, args: &Args, cwd: &Path) {
    if let Some(root) = &args.src_root {
        loaded.config.source_root = cwd.join(root).to_string_lossy().into_owned();
    }
    if let Some(root) = &args.dest_root {
        loaded.config.destination_root = cwd.join(root).to_string_lossy().into_owned();
    }
}

/// Merge command line flags over the config's batch options.
fn batch_options(loaded: &LoadedConfig, args: &Args) -> CopyAllOptions {
    let config = &loaded.config;

    CopyAllOptions {
        quiet: args.quiet || config.quiet,
        hash_optimization: !args.no_hash && config.hash_optimization,
        continue_on_error: args.continue_on_error || config.continue_on_error,
        jobs: args.jobs.or(config.jobs).unwrap_or(1),
        cancel: None,
    }
}

fn print_result(result: &BatchResult, destination_root: &Path, quiet: bool) {
    if !quiet {
        for record in &result.records {
            let label = record
                .destination
                .strip_prefix(destination_root)
                .unwrap_or(&record.destination);
            output::print_record(&label.to_string_lossy(), &record.status);
        }
        println!();
    }

    for failure in &result.failures {
        output::print_error(&format!(
            "{} -> {}: {}",
            failure.source.display(),
            failure.destination.display(),
            failure.error
        ));
    }

    output::print_summary(
        result.targets_copied,
        result.targets_processed,
        result.failures.len(),
        result.cancelled,
    );
}
