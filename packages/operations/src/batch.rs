//! Incremental batch copying.
//!
//! Each target is compared first and only copied when its destination is
//! missing, stale or cannot be verified. Results are folded into a
//! [`BatchResult`] in the order the targets were supplied.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::Level;
use rayon::prelude::*;
use skipcopy_compare::{Decision, DecisionReason, decide, decide_link};
use skipcopy_copy::CopyError;

use crate::copy::{FileCopier, PrimitiveCopier, ensure_destination_dir};
use crate::error::BatchError;
use crate::progress::{BatchProgress, ProgressTracker};
use crate::target::{CopyTarget, ResolvedTarget};

/// Shared flag for abandoning the rest of a batch.
///
/// Targets already being copied finish; targets not yet started are left
/// unprocessed.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for a batch.
#[derive(Debug, Clone)]
pub struct CopyAllOptions {
    /// Log per-target results at debug instead of info.
    pub quiet: bool,
    /// Compare before copying. When off every target is copied.
    pub hash_optimization: bool,
    /// Record failed targets and keep going instead of stopping.
    pub continue_on_error: bool,
    /// Targets processed at once. `0` means one per CPU.
    pub jobs: usize,
    /// Checked before each target.
    pub cancel: Option<CancelFlag>,
}

impl Default for CopyAllOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            hash_optimization: true,
            continue_on_error: false,
            jobs: 1,
            cancel: None,
        }
    }
}

impl CopyAllOptions {
    fn worker_count(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    const fn log_level(&self) -> Level {
        if self.quiet { Level::Debug } else { Level::Info }
    }
}

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    /// The copy completed.
    Copied(DecisionReason),
    /// The destination was left alone.
    Skipped(DecisionReason),
    /// The copy failed (only recorded when continuing past failures).
    Failed(String),
}

/// Outcome of one target, in batch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecord {
    /// Position of the target in the batch.
    pub index: usize,
    /// Resolved source path.
    pub source: PathBuf,
    /// Resolved destination path.
    pub destination: PathBuf,
    /// What happened.
    pub status: TargetStatus,
}

/// A target that failed while the batch continued.
#[derive(Debug)]
pub struct TargetFailure {
    /// Position of the target in the batch.
    pub index: usize,
    /// Resolved source path.
    pub source: PathBuf,
    /// Resolved destination path.
    pub destination: PathBuf,
    /// The underlying copy error.
    pub error: CopyError,
}

/// Aggregate result of a batch.
///
/// `targets_copied + targets_skipped + failures.len() == targets_processed`.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Targets that entered processing, whatever their outcome.
    pub targets_processed: usize,
    /// Targets whose copy completed.
    pub targets_copied: usize,
    /// Targets left alone.
    pub targets_skipped: usize,
    /// Failed targets (only when continuing past failures).
    pub failures: Vec<TargetFailure>,
    /// Whether the batch stopped early because it was cancelled.
    pub cancelled: bool,
    /// Per-target outcomes in batch order.
    pub records: Vec<TargetRecord>,
}

impl BatchResult {
    /// Whether every processed target was copied or skipped.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// How one target resolved before folding.
enum Resolution {
    Copied(DecisionReason),
    Skipped(DecisionReason),
    Failed(CopyError),
}

/// Compare a resolved target's source and destination.
///
/// A symlinked source that will be recreated as a link is compared by link
/// target; everything else is compared by content.
#[must_use]
pub fn decide_target(target: &ResolvedTarget) -> Decision {
    let is_link = fs::symlink_metadata(&target.source)
        .is_ok_and(|metadata| metadata.file_type().is_symlink());

    if is_link && !target.dereference_symlinks {
        decide_link(&target.source, &target.destination, target.overwrite)
    } else {
        decide(&target.source, &target.destination, target.overwrite)
    }
}

/// Whether copying a resolved target can be skipped.
#[must_use]
pub fn should_skip(target: &ResolvedTarget) -> bool {
    decide_target(target).is_skip()
}

/// Copy every target whose destination is not already up to date.
///
/// # Arguments
///
/// * `source_root` - Root relative source paths are resolved against
/// * `destination_root` - Root relative destination paths are resolved against
/// * `targets` - Targets, processed in order
/// * `options` - Batch options
///
/// # Errors
///
/// * If a target fails and `continue_on_error` is off
/// * If the worker pool cannot be created
pub fn copy_all(
    source_root: &Path,
    destination_root: &Path,
    targets: &[CopyTarget],
    options: &CopyAllOptions,
) -> Result<BatchResult, BatchError> {
    copy_all_with(
        &PrimitiveCopier,
        source_root,
        destination_root,
        targets,
        options,
    )
}

/// [`copy_all`] with a custom copier.
///
/// # Errors
///
/// * If a target fails and `continue_on_error` is off
/// * If the worker pool cannot be created
pub fn copy_all_with<C>(
    copier: &C,
    source_root: &Path,
    destination_root: &Path,
    targets: &[CopyTarget],
    options: &CopyAllOptions,
) -> Result<BatchResult, BatchError>
where
    C: FileCopier + ?Sized,
{
    copy_all_with_progress(
        copier,
        source_root,
        destination_root,
        targets,
        options,
        |_| {},
    )
}

/// [`copy_all_with`] reporting progress after each target.
///
/// With `jobs > 1` the callback is invoked from worker threads. Targets that
/// share a destination always run one after another, in batch order.
///
/// # Errors
///
/// * If a target fails and `continue_on_error` is off
/// * If the worker pool cannot be created
pub fn copy_all_with_progress<C, F>(
    copier: &C,
    source_root: &Path,
    destination_root: &Path,
    targets: &[CopyTarget],
    options: &CopyAllOptions,
    on_progress: F,
) -> Result<BatchResult, BatchError>
where
    C: FileCopier + ?Sized,
    F: Fn(&BatchProgress) + Sync,
{
    let resolved: Vec<ResolvedTarget> = targets
        .iter()
        .map(|target| target.resolve(source_root, destination_root))
        .collect();

    let workers = options.worker_count();
    log::debug!(
        "Copying {} targets from {} to {} with {workers} worker(s)",
        resolved.len(),
        source_root.display(),
        destination_root.display()
    );

    let tracker = ProgressTracker::new(resolved.len());
    let abort = AtomicBool::new(false);

    let run = |index: usize| -> Option<Resolution> {
        if options.is_cancelled() || abort.load(Ordering::SeqCst) {
            return None;
        }

        let target = &resolved[index];
        let resolution = process_target(copier, target, options);

        if matches!(resolution, Resolution::Failed(_)) && !options.continue_on_error {
            abort.store(true, Ordering::SeqCst);
        }

        let progress = tracker.record(
            matches!(resolution, Resolution::Copied(_)),
            Some(target.destination.display().to_string()),
        );
        on_progress(&progress);

        Some(resolution)
    };

    let outcomes: Vec<Option<Resolution>> = if workers <= 1 || resolved.len() <= 1 {
        (0..resolved.len()).map(&run).collect()
    } else {
        let groups = group_by_destination(&resolved);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let finished: Vec<Vec<(usize, Option<Resolution>)>> = pool.install(|| {
            groups
                .par_iter()
                .map(|group| {
                    group
                        .iter()
                        .map(|&index| (index, run(index)))
                        .collect::<Vec<_>>()
                })
                .collect()
        });

        let mut outcomes: Vec<Option<Resolution>> = (0..resolved.len()).map(|_| None).collect();
        for (index, outcome) in finished.into_iter().flatten() {
            outcomes[index] = outcome;
        }
        outcomes
    };

    fold_outcomes(&resolved, outcomes, options)
}

/// Decide and, if needed, copy one target.
fn process_target<C>(copier: &C, target: &ResolvedTarget, options: &CopyAllOptions) -> Resolution
where
    C: FileCopier + ?Sized,
{
    let decision = if options.hash_optimization {
        decide_target(target)
    } else {
        Decision::from_reason(DecisionReason::ComparisonDisabled)
    };

    if decision.is_skip() {
        log::log!(
            options.log_level(),
            "Skipped {} ({})",
            target.destination.display(),
            decision.reason
        );
        return Resolution::Skipped(decision.reason);
    }

    match ensure_destination_dir(target).and_then(|()| copier.copy(target)) {
        Ok(()) => {
            log::log!(
                options.log_level(),
                "Copied {} -> {} ({})",
                target.source.display(),
                target.destination.display(),
                decision.reason
            );
            Resolution::Copied(decision.reason)
        }
        Err(e) => {
            if options.continue_on_error {
                log::warn!("Failed to copy {}: {e}", target.source.display());
            }
            Resolution::Failed(e)
        }
    }
}

/// Fold per-target outcomes, in batch order, into the batch result.
fn fold_outcomes(
    resolved: &[ResolvedTarget],
    outcomes: Vec<Option<Resolution>>,
    options: &CopyAllOptions,
) -> Result<BatchResult, BatchError> {
    let mut result = BatchResult::default();
    let mut unprocessed = false;

    for (index, (target, outcome)) in resolved.iter().zip(outcomes).enumerate() {
        let Some(resolution) = outcome else {
            unprocessed = true;
            continue;
        };

        result.targets_processed += 1;

        let status = match resolution {
            Resolution::Copied(reason) => {
                result.targets_copied += 1;
                TargetStatus::Copied(reason)
            }
            Resolution::Skipped(reason) => {
                result.targets_skipped += 1;
                TargetStatus::Skipped(reason)
            }
            Resolution::Failed(error) => {
                if !options.continue_on_error {
                    return Err(BatchError::Target {
                        index,
                        source_path: target.source.clone(),
                        destination_path: target.destination.clone(),
                        error,
                    });
                }
                let status = TargetStatus::Failed(error.to_string());
                result.failures.push(TargetFailure {
                    index,
                    source: target.source.clone(),
                    destination: target.destination.clone(),
                    error,
                });
                status
            }
        };

        result.records.push(TargetRecord {
            index,
            source: target.source.clone(),
            destination: target.destination.clone(),
            status,
        });
    }

    result.cancelled = unprocessed && options.is_cancelled();

    log::debug!(
        "Batch done: {} processed, {} copied, {} skipped, {} failed",
        result.targets_processed,
        result.targets_copied,
        result.targets_skipped,
        result.failures.len()
    );

    Ok(result)
}

/// Group target indices by destination, keeping batch order inside a group.
fn group_by_destination(targets: &[ResolvedTarget]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut by_destination: HashMap<&Path, usize> = HashMap::new();

    for (index, target) in targets.iter().enumerate() {
        let group = *by_destination
            .entry(target.destination.as_path())
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[group].push(index);
    }

    groups
}
