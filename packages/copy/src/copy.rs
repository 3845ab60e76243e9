//! Copy primitive for files, directories and symlinks.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use filetime::FileTime;
use rayon::prelude::*;
use tempfile::TempPath;

use crate::error::CopyError;

/// Options controlling a single copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Apply the source's access and modification times to the copy.
    pub preserve_timestamps: bool,
    /// Copy what a symlink points at instead of recreating the link.
    pub dereference_symlinks: bool,
    /// Replace an existing target.
    pub overwrite: bool,
    /// Fail with [`CopyError::TargetExists`] when the target exists and
    /// `overwrite` is off. Otherwise the copy reports [`CopyResult::Exists`].
    pub error_on_exist: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_timestamps: false,
            dereference_symlinks: false,
            overwrite: true,
            error_on_exist: false,
        }
    }
}

/// Result of a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyResult {
    /// Files were copied successfully.
    Created {
        /// Number of files (or links) written.
        files_copied: u64,
    },
    /// Target already exists and overwriting was disabled.
    Exists,
}

/// Entry collected during directory enumeration.
#[derive(Debug, Clone)]
struct FileEntry {
    /// Source path.
    source: PathBuf,
    /// Target path.
    target: PathBuf,
    /// Whether this entry should be recreated as a symlink.
    is_symlink: bool,
}

/// Copy `source` to `target`, whatever kind of path `source` is.
///
/// Symlinks are recreated unless `dereference_symlinks` is set, directories
/// are copied recursively and everything else is copied as a single file.
/// Missing parent directories of `target` are created.
///
/// # Errors
///
/// * If `source` does not exist
/// * If the target exists and `error_on_exist` is set without `overwrite`
/// * If any directory creation, copy or rename fails
pub fn copy_path(
    source: &Path,
    target: &Path,
    options: &CopyOptions,
) -> Result<CopyResult, CopyError> {
    let metadata = fs::symlink_metadata(source).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CopyError::SourceNotFound {
                path: source.to_path_buf(),
            }
        } else {
            CopyError::MetadataError {
                path: source.to_path_buf(),
                io_error: e,
            }
        }
    })?;

    if metadata.file_type().is_symlink() && !options.dereference_symlinks {
        return copy_symlink(source, target, options);
    }

    if source.is_dir() {
        copy_directory(source, target, options)
    } else {
        copy_file(source, target, options)
    }
}

/// Copy a single file.
///
/// The contents are staged in a temporary file next to `target` and then
/// renamed over it, so readers never observe a partially written target.
///
/// # Errors
///
/// * If `source` does not exist or cannot be read
/// * If the target exists and `error_on_exist` is set without `overwrite`
/// * If the parent directory cannot be created
/// * If the staged file cannot be renamed into place
pub fn copy_file(
    source: &Path,
    target: &Path,
    options: &CopyOptions,
) -> Result<CopyResult, CopyError> {
    log::debug!("Copying file: {} -> {}", source.display(), target.display());

    if !source.exists() {
        return Err(CopyError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    if let Some(result) = check_existing(target, options)? {
        return Ok(result);
    }

    let parent = ensure_parent(target)?;

    let staged = tempfile::Builder::new()
        .prefix(".skipcopy-")
        .tempfile_in(&parent)
        .map_err(|e| CopyError::FileCopyError {
            source_path: source.to_path_buf(),
            target_path: target.to_path_buf(),
            io_error: e,
        })?
        .into_temp_path();

    stage_contents(source, &staged, target, options)?;

    staged.persist(target).map_err(|e| CopyError::RenameError {
        path: target.to_path_buf(),
        io_error: e.error,
    })?;

    Ok(CopyResult::Created { files_copied: 1 })
}

/// Copy a directory tree with parallel file copying.
///
/// Existing files inside an existing target directory are replaced when
/// `overwrite` is set and left alone otherwise.
///
/// # Errors
///
/// * If enumeration fails
/// * If any file copy fails (fail-fast behavior)
pub fn copy_directory(
    source: &Path,
    target: &Path,
    options: &CopyOptions,
) -> Result<CopyResult, CopyError> {
    log::debug!(
        "Copying directory: {} -> {}",
        source.display(),
        target.display()
    );

    if !source.exists() {
        return Err(CopyError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    if let Some(result) = check_existing(target, options)? {
        return Ok(result);
    }

    let (dirs, entries) = enumerate_directory(source, target, options.dereference_symlinks)?;

    log::debug!("Found {} files to copy", entries.len());

    for dir in std::iter::once(target.to_path_buf()).chain(dirs) {
        fs::create_dir_all(&dir).map_err(|e| CopyError::CreateDirError {
            path: dir,
            io_error: e,
        })?;
    }

    let copied = AtomicU64::new(0);

    entries
        .par_iter()
        .try_for_each(|entry| -> Result<(), CopyError> {
            let result = if entry.is_symlink {
                copy_symlink(&entry.source, &entry.target, options)?
            } else {
                copy_file(&entry.source, &entry.target, options)?
            };

            if let CopyResult::Created { files_copied } = result {
                copied.fetch_add(files_copied, Ordering::Relaxed);
            }

            Ok(())
        })?;

    Ok(CopyResult::Created {
        files_copied: copied.into_inner(),
    })
}

/// Handle an existing target according to `overwrite` and `error_on_exist`.
///
/// Returns `Some` when the copy must not proceed.
fn check_existing(target: &Path, options: &CopyOptions) -> Result<Option<CopyResult>, CopyError> {
    let exists = fs::symlink_metadata(target).is_ok();

    if !exists || options.overwrite {
        return Ok(None);
    }

    if options.error_on_exist {
        return Err(CopyError::TargetExists {
            path: target.to_path_buf(),
        });
    }

    log::debug!("Target already exists");
    Ok(Some(CopyResult::Exists))
}

/// Create the parent directory of `target` and return it.
fn ensure_parent(target: &Path) -> Result<PathBuf, CopyError> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&parent).map_err(|e| CopyError::CreateDirError {
        path: parent.clone(),
        io_error: e,
    })?;

    Ok(parent)
}

/// Fill the staging path with the source contents and metadata.
fn stage_contents(
    source: &Path,
    staged: &TempPath,
    target: &Path,
    options: &CopyOptions,
) -> Result<(), CopyError> {
    let copy_error = |e: io::Error| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    };

    // reflink needs a fresh path
    fs::remove_file(staged).map_err(copy_error)?;

    match reflink_copy::reflink(source, staged) {
        Ok(()) => {
            log::trace!("Reflinked {} -> {}", source.display(), target.display());
        }
        Err(_) => {
            fs::copy(source, staged).map_err(copy_error)?;
            log::trace!("Copied {} -> {}", source.display(), target.display());
        }
    }

    let metadata = fs::metadata(source).map_err(|e| CopyError::MetadataError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    fs::set_permissions(staged, metadata.permissions()).map_err(|e| CopyError::MetadataError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    if options.preserve_timestamps {
        filetime::set_file_times(
            staged,
            FileTime::from_last_access_time(&metadata),
            FileTime::from_last_modification_time(&metadata),
        )
        .map_err(|e| CopyError::MetadataError {
            path: target.to_path_buf(),
            io_error: e,
        })?;
    }

    Ok(())
}

/// Enumerate a directory using jwalk, returning the directories to create
/// and the entries to copy.
fn enumerate_directory(
    source: &Path,
    target: &Path,
    follow_links: bool,
) -> Result<(BTreeSet<PathBuf>, Vec<FileEntry>), CopyError> {
    let mut dirs = BTreeSet::new();
    let mut entries = Vec::new();

    for entry in jwalk::WalkDir::new(source)
        .skip_hidden(false)
        .follow_links(follow_links)
    {
        let entry = entry.map_err(|e| CopyError::EnumerationError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let source_path = entry.path();

        if source_path == source {
            continue;
        }

        let rel_path =
            source_path
                .strip_prefix(source)
                .map_err(|_| CopyError::EnumerationError {
                    path: source_path.clone(),
                    message: "Failed to strip prefix".to_string(),
                })?;
        let target_path = target.join(rel_path);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            dirs.insert(target_path);
            continue;
        }

        entries.push(FileEntry {
            source: source_path.clone(),
            target: target_path,
            is_symlink: file_type.is_symlink() && !follow_links,
        });
    }

    Ok((dirs, entries))
}

/// Recreate a symlink at `target` pointing where `source` points.
fn copy_symlink(
    source: &Path,
    target: &Path,
    options: &CopyOptions,
) -> Result<CopyResult, CopyError> {
    let link_target = fs::read_link(source).map_err(|e| CopyError::ReadLinkError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    if let Some(result) = check_existing(target, options)? {
        return Ok(result);
    }

    ensure_parent(target)?;

    if let Ok(existing) = fs::symlink_metadata(target) {
        let removed = if existing.is_dir() {
            fs::remove_dir_all(target)
        } else {
            fs::remove_file(target)
        };
        removed.map_err(|e| CopyError::RemoveError {
            path: target.to_path_buf(),
            io_error: e,
        })?;
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&link_target, target).map_err(|e| {
            CopyError::CreateSymlinkError {
                path: target.to_path_buf(),
                io_error: e,
            }
        })?;
    }

    #[cfg(windows)]
    {
        let resolved = source.parent().map_or_else(|| link_target.clone(), |p| p.join(&link_target));
        let created = if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, target)
        } else {
            std::os::windows::fs::symlink_file(&link_target, target)
        };
        created.map_err(|e| CopyError::CreateSymlinkError {
            path: target.to_path_buf(),
            io_error: e,
        })?;
    }

    log::trace!(
        "Symlinked {} -> {} (target: {})",
        source.display(),
        target.display(),
        link_target.display()
    );

    Ok(CopyResult::Created { files_copied: 1 })
}
