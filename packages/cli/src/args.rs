//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for skipcopy.
#[derive(Debug, Parser)]
#[command(
    name = "skipcopy",
    about = "Copy files incrementally, skipping destinations that already match",
    version
)]
pub struct Args {
    /// Config file (defaults to skipcopy.config.toml or .json in the current directory).
    #[arg(index = 1)]
    pub config: Option<PathBuf>,

    /// Override the config's source root.
    #[arg(long = "src-root")]
    pub src_root: Option<PathBuf>,

    /// Override the config's destination root.
    #[arg(long = "dest-root")]
    pub dest_root: Option<PathBuf>,

    /// Only print failures and the summary.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Copy every target without comparing first.
    #[arg(long = "no-hash")]
    pub no_hash: bool,

    /// Keep going after a target fails.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of targets to process at once (0 = one per CPU).
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}
