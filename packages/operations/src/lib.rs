//! Incremental batch copying for skipcopy.
//!
//! This crate turns a configuration into copy targets and copies them,
//! skipping every target whose destination already holds identical content:
//!
//! * Target planning (plain paths and glob patterns)
//! * Skip decisions per target (size probe, then content fingerprint)
//! * Batch copying with fail-fast or continue-on-error policies
//! * Optional bounded concurrency and cancellation
//!
//! # Example
//!
//! ```rust,ignore
//! use skipcopy_operations::{CopyAllOptions, CopyTarget, copy_all};
//!
//! let targets = [CopyTarget::new("logo.png", "img/logo.png")];
//! let result = copy_all(&source_root, &destination_root, &targets, &CopyAllOptions::default())?;
//!
//! println!("copied {} of {}", result.targets_copied, result.targets_processed);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod batch;
mod copy;
mod error;
mod plan;
mod progress;
mod target;

pub use batch::{
    BatchResult, CancelFlag, CopyAllOptions, TargetFailure, TargetRecord, TargetStatus, copy_all,
    copy_all_with, copy_all_with_progress, decide_target, should_skip,
};
pub use copy::{FileCopier, PrimitiveCopier, ensure_destination_dir};
pub use error::{BatchError, OperationError};
pub use plan::plan_targets;
pub use progress::{BatchProgress, ProgressTracker};
pub use skipcopy_compare::{ComparisonOutcome, Decision, DecisionReason};
pub use target::{CopyTarget, ResolvedTarget};
