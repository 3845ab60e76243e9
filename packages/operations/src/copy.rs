//! The copy step of a batch.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;

use skipcopy_copy::{CopyError, CopyOptions, copy_path};

use crate::target::ResolvedTarget;

/// Performs the actual copy for targets the batch decided to copy.
///
/// The batch has already created the destination's parent directory and
/// always wants the destination replaced.
pub trait FileCopier: Sync {
    /// Copy `target.source` over `target.destination`.
    ///
    /// # Errors
    ///
    /// * If the copy fails
    fn copy(&self, target: &ResolvedTarget) -> Result<(), CopyError>;
}

/// [`FileCopier`] backed by [`skipcopy_copy::copy_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveCopier;

impl FileCopier for PrimitiveCopier {
    fn copy(&self, target: &ResolvedTarget) -> Result<(), CopyError> {
        let options = CopyOptions {
            preserve_timestamps: target.preserve_timestamps,
            dereference_symlinks: target.dereference_symlinks,
            overwrite: true,
            error_on_exist: false,
        };

        copy_path(&target.source, &target.destination, &options).map(|_| ())
    }
}

/// Create the destination's parent directories. Existing directories are fine.
///
/// # Errors
///
/// * If a directory cannot be created
pub fn ensure_destination_dir(target: &ResolvedTarget) -> Result<(), CopyError> {
    let Some(parent) = target.destination.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).map_err(|e| CopyError::CreateDirError {
        path: parent.to_path_buf(),
        io_error: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolved(dir: &TempDir, source: &str, destination: &str) -> ResolvedTarget {
        ResolvedTarget {
            source: dir.path().join(source),
            destination: dir.path().join(destination),
            overwrite: true,
            preserve_timestamps: false,
            dereference_symlinks: false,
        }
    }

    #[test]
    fn test_primitive_copier_overwrites() {
        let dir = TempDir::new().unwrap();
        let target = resolved(&dir, "src.txt", "dest.txt");
        fs::write(&target.source, "new content").unwrap();
        fs::write(&target.destination, "old content").unwrap();

        PrimitiveCopier.copy(&target).unwrap();

        assert_eq!(
            fs::read_to_string(&target.destination).unwrap(),
            "new content"
        );
    }

    #[test]
    fn test_primitive_copier_missing_source() {
        let dir = TempDir::new().unwrap();
        let target = resolved(&dir, "missing.txt", "dest.txt");

        let err = PrimitiveCopier.copy(&target).unwrap_err();

        assert!(matches!(err, CopyError::SourceNotFound { .. }));
    }

    #[test]
    fn test_ensure_destination_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = resolved(&dir, "src.txt", "a/b/dest.txt");

        ensure_destination_dir(&target).unwrap();
        ensure_destination_dir(&target).unwrap();

        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_ensure_destination_dir_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "not a directory").unwrap();
        let target = resolved(&dir, "src.txt", "a/dest.txt");

        let err = ensure_destination_dir(&target).unwrap_err();

        assert!(matches!(err, CopyError::CreateDirError { .. }));
    }
}
