//! Copy targets and their resolution against source and destination roots.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;
use std::path::{Path, PathBuf};

/// One requested copy.
///
/// Targets are immutable; the `with_*` builders consume and return a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTarget {
    source_path: PathBuf,
    destination_path: PathBuf,
    overwrite: Option<bool>,
    preserve_timestamps: Option<bool>,
    dereference_symlinks: Option<bool>,
}

impl CopyTarget {
    /// A target copying `source_path` to `destination_path`.
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            overwrite: None,
            preserve_timestamps: None,
            dereference_symlinks: None,
        }
    }

    /// Set whether an existing, differing destination may be replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Set whether the copy keeps the source's timestamps.
    #[must_use]
    pub fn with_preserve_timestamps(mut self, preserve: bool) -> Self {
        self.preserve_timestamps = Some(preserve);
        self
    }

    /// Set whether symlinked sources are copied by content.
    #[must_use]
    pub fn with_dereference_symlinks(mut self, dereference: bool) -> Self {
        self.dereference_symlinks = Some(dereference);
        self
    }

    /// Source path as given.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Destination path as given.
    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// Whether overwriting is allowed. Defaults to `true`.
    #[must_use]
    pub fn overwrite(&self) -> bool {
        self.overwrite.unwrap_or(true)
    }

    /// Whether timestamps are preserved. Defaults to `false`.
    #[must_use]
    pub fn preserve_timestamps(&self) -> bool {
        self.preserve_timestamps.unwrap_or(false)
    }

    /// Whether symlinks are dereferenced. Defaults to `false`.
    #[must_use]
    pub fn dereference_symlinks(&self) -> bool {
        self.dereference_symlinks.unwrap_or(false)
    }

    /// Resolve against the batch roots.
    ///
    /// Relative paths are joined onto their root, absolute paths are kept,
    /// and the result is made absolute and lexically cleaned.
    #[must_use]
    pub fn resolve(&self, source_root: &Path, destination_root: &Path) -> ResolvedTarget {
        ResolvedTarget {
            source: resolve_path(source_root, &self.source_path),
            destination: resolve_path(destination_root, &self.destination_path),
            overwrite: self.overwrite(),
            preserve_timestamps: self.preserve_timestamps(),
            dereference_symlinks: self.dereference_symlinks(),
        }
    }
}

/// A target with concrete filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Absolute source path.
    pub source: PathBuf,
    /// Absolute destination path.
    pub destination: PathBuf,
    /// Whether an existing, differing destination may be replaced.
    pub overwrite: bool,
    /// Forwarded to the copy primitive.
    pub preserve_timestamps: bool,
    /// Forwarded to the copy primitive.
    pub dereference_symlinks: bool,
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let joined = root.join(path);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(joined),
            Err(_) => joined,
        }
    };
    path_clean::clean(absolute)
}
