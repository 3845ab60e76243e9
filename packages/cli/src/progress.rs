//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use indicatif::{ProgressBar, ProgressStyle};
use skipcopy_operations::BatchProgress;

/// Progress bar for a batch.
pub struct BatchBar {
    bar: ProgressBar,
}

impl BatchBar {
    /// Create a bar for `total` targets.
    ///
    /// If progress is disabled, the bar is hidden.
    #[must_use]
    pub fn new(total: usize, enabled: bool) -> Self {
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:25.green/dim}] {pos}/{len} targets {wide_msg}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        Self { bar }
    }

    /// Update from a batch snapshot.
    pub fn update(&self, progress: &BatchProgress) {
        self.bar
            .set_position(u64::try_from(progress.targets_processed).unwrap_or(u64::MAX));
        if let Some(current) = &progress.current_target {
            self.bar.set_message(current.clone());
        }
    }

    /// Remove the bar (for clean output after completion).
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
