//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;

use colored::Colorize;
use skipcopy_operations::TargetStatus;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{}\n", message.bold());
}

/// Print the config and roots in use.
pub fn print_config_info(config_path: &str, source_root: &str, destination_root: &str) {
    println!("Config:      {}", config_path.cyan());
    println!("Source:      {}", source_root.cyan());
    println!("Destination: {}", destination_root.cyan());
    println!();
}

/// Print the outcome of one target.
///
/// Shows a checkmark for copies, a bullet for skips and a cross for failures.
pub fn print_record(label: &str, status: &TargetStatus) {
    match status {
        TargetStatus::Copied(reason) => {
            println!(
                "{} {:<40} {}",
                "✓".green(),
                label,
                format!("copied ({reason})").dimmed()
            );
        }
        TargetStatus::Skipped(reason) => {
            println!(
                "{} {:<40} {}",
                "•".dimmed(),
                label,
                format!("skipped ({reason})").dimmed()
            );
        }
        TargetStatus::Failed(message) => {
            println!("{} {:<40} {}", "✗".red(), label, message.red());
        }
    }
    let _ = std::io::stdout().flush();
}

/// Print the batch summary.
pub fn print_summary(copied: usize, processed: usize, failed: usize, cancelled: bool) {
    let summary = format!("copied {copied} of {processed}");
    if failed > 0 {
        println!("{} ({} failed)", summary.yellow().bold(), failed);
    } else {
        println!("{}", summary.green().bold());
    }
    if cancelled {
        print_warning("Batch was cancelled before every target was processed.");
    }
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
