//! Error types for planning and batch copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use skipcopy_copy::CopyError;
use thiserror::Error;

/// Errors that can occur while turning a config into targets.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Glob pattern error.
    #[error("Glob pattern error: {0}")]
    GlobError(#[from] glob::PatternError),

    /// A source path has no file name to copy to.
    #[error("Source has no file name: {0}")]
    InvalidSource(String),
}

/// Errors that stop a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A target failed and the batch was not told to continue past failures.
    #[error("Target #{index} ({} -> {}) failed: {error}", source_path.display(), destination_path.display())]
    Target {
        /// Position of the target in the batch.
        index: usize,
        /// Resolved source path.
        source_path: PathBuf,
        /// Resolved destination path.
        destination_path: PathBuf,
        /// The underlying copy error.
        #[source]
        error: CopyError,
    },

    /// The worker pool for concurrent batches could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
