//! Cheap size lookup.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

/// Size in bytes of the regular file at `path`, following symlinks.
///
/// Returns `None` when the path is missing, unreadable or not a regular
/// file. That means "cannot compare", never a failure.
#[must_use]
pub fn probe_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Some(metadata.len()),
        Ok(_) => {
            log::trace!("Not a regular file: {}", path.display());
            None
        }
        Err(e) => {
            log::trace!("Cannot stat {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_probe_size_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "hello").unwrap();

        assert_eq!(probe_size(&file), Some(5));
    }

    #[test]
    fn test_probe_size_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty");
        fs::write(&file, "").unwrap();

        assert_eq!(probe_size(&file), Some(0));
    }

    #[test]
    fn test_probe_size_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(probe_size(&dir.path().join("missing")), None);
    }

    #[test]
    fn test_probe_size_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(probe_size(dir.path()), None);
    }
}
