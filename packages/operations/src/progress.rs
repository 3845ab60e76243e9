//! Progress tracking for batches.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress information for a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    /// Number of targets in the batch.
    pub targets_total: usize,
    /// Targets resolved so far (copied, skipped or failed).
    pub targets_processed: usize,
    /// Targets copied so far.
    pub targets_copied: usize,
    /// Destination of the target that just finished.
    pub current_target: Option<String>,
}

/// Thread-safe progress counters, shared by the batch workers.
#[derive(Debug)]
pub struct ProgressTracker {
    targets_total: usize,
    targets_processed: AtomicUsize,
    targets_copied: AtomicUsize,
}

impl ProgressTracker {
    /// Create a tracker for a batch of `targets_total` targets.
    #[must_use]
    pub const fn new(targets_total: usize) -> Self {
        Self {
            targets_total,
            targets_processed: AtomicUsize::new(0),
            targets_copied: AtomicUsize::new(0),
        }
    }

    /// Record a finished target and return a snapshot.
    pub fn record(&self, copied: bool, current_target: Option<String>) -> BatchProgress {
        if copied {
            self.targets_copied.fetch_add(1, Ordering::SeqCst);
        }
        self.targets_processed.fetch_add(1, Ordering::SeqCst);
        self.snapshot(current_target)
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self, current_target: Option<String>) -> BatchProgress {
        BatchProgress {
            targets_total: self.targets_total,
            targets_processed: self.targets_processed.load(Ordering::SeqCst),
            targets_copied: self.targets_copied.load(Ordering::SeqCst),
            current_target,
        }
    }
}
