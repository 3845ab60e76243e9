//! Copy/skip decisions for a single source and destination pair.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::fs;
use std::path::Path;

use crate::fingerprint::{Fingerprint, fingerprint};
use crate::probe::probe_size;

/// Whether a target needs copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// The destination is missing, stale or could not be verified.
    ProceedWithCopy,
    /// The destination already has the source's contents, or must not be
    /// overwritten.
    Skip,
}

/// The stage that settled a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Comparison was turned off, so every target is copied.
    ComparisonDisabled,
    /// The destination does not exist.
    DestinationMissing,
    /// The destination exists and the target disables overwriting.
    OverwriteDisabled,
    /// One of the sizes could not be read.
    SizeUnavailable,
    /// The sizes differ.
    SizeMismatch,
    /// One of the files could not be hashed.
    FingerprintUnavailable,
    /// Same size, different contents.
    FingerprintMismatch,
    /// Same contents.
    FingerprintMatch,
    /// One of the symlinks could not be read, or the destination is not a link.
    LinkUnavailable,
    /// The symlinks point at different paths.
    LinkMismatch,
    /// The symlinks point at the same path.
    LinkMatch,
}

impl DecisionReason {
    /// The outcome this reason implies.
    #[must_use]
    pub const fn outcome(self) -> ComparisonOutcome {
        match self {
            Self::OverwriteDisabled | Self::FingerprintMatch | Self::LinkMatch => {
                ComparisonOutcome::Skip
            }
            Self::ComparisonDisabled
            | Self::DestinationMissing
            | Self::SizeUnavailable
            | Self::SizeMismatch
            | Self::FingerprintUnavailable
            | Self::FingerprintMismatch
            | Self::LinkUnavailable
            | Self::LinkMismatch => ComparisonOutcome::ProceedWithCopy,
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComparisonDisabled => write!(f, "comparison disabled"),
            Self::DestinationMissing => write!(f, "destination missing"),
            Self::OverwriteDisabled => write!(f, "overwrite disabled"),
            Self::SizeUnavailable => write!(f, "size unavailable"),
            Self::SizeMismatch => write!(f, "size differs"),
            Self::FingerprintUnavailable => write!(f, "hash unavailable"),
            Self::FingerprintMismatch => write!(f, "content differs"),
            Self::FingerprintMatch => write!(f, "unchanged"),
            Self::LinkUnavailable => write!(f, "link unavailable"),
            Self::LinkMismatch => write!(f, "link differs"),
            Self::LinkMatch => write!(f, "link unchanged"),
        }
    }
}

/// The result of comparing one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Copy or skip.
    pub outcome: ComparisonOutcome,
    /// Why.
    pub reason: DecisionReason,
}

impl Decision {
    /// A decision settled by `reason`.
    #[must_use]
    pub const fn from_reason(reason: DecisionReason) -> Self {
        Self {
            outcome: reason.outcome(),
            reason,
        }
    }

    /// Whether the copy can be skipped.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        self.outcome == ComparisonOutcome::Skip
    }
}

/// Decide whether copying `source` over `destination` can be skipped.
///
/// Stages run in order and any inconclusive stage settles on copying:
///
/// 1. A missing destination is always copied.
/// 2. An existing destination with `overwrite` off is always skipped.
/// 3. Both sizes are probed concurrently; a missing or differing size copies.
/// 4. Both files are fingerprinted concurrently; only a match skips.
#[must_use]
pub fn decide(source: &Path, destination: &Path, overwrite: bool) -> Decision {
    let reason = decide_reason(source, destination, overwrite, probe_size, fingerprint);
    logged(source, destination, reason)
}

/// Decide whether recreating the symlink `source` at `destination` can be
/// skipped.
///
/// Links are compared by where they point, not by what they point at, so a
/// dangling link is still recognised as up to date.
///
/// 1. A missing destination (not even a dangling link) is always copied.
/// 2. An existing destination with `overwrite` off is always skipped.
/// 3. Both link targets are read; only identical targets skip.
#[must_use]
pub fn decide_link(source: &Path, destination: &Path, overwrite: bool) -> Decision {
    let reason = decide_link_reason(source, destination, overwrite);
    logged(source, destination, reason)
}

fn logged(source: &Path, destination: &Path, reason: DecisionReason) -> Decision {
    log::debug!(
        "{} -> {}: {reason}",
        source.display(),
        destination.display()
    );

    Decision::from_reason(reason)
}

/// Shorthand for `decide(..).is_skip()`.
#[must_use]
pub fn should_skip(source: &Path, destination: &Path, overwrite: bool) -> bool {
    decide(source, destination, overwrite).is_skip()
}

fn decide_reason<S, H>(
    source: &Path,
    destination: &Path,
    overwrite: bool,
    size: S,
    hash: H,
) -> DecisionReason
where
    S: Fn(&Path) -> Option<u64> + Sync,
    H: Fn(&Path) -> Option<Fingerprint> + Sync,
{
    if !destination.exists() {
        return DecisionReason::DestinationMissing;
    }

    if !overwrite {
        return DecisionReason::OverwriteDisabled;
    }

    let (Some(source_size), Some(destination_size)) =
        rayon::join(|| size(source), || size(destination))
    else {
        return DecisionReason::SizeUnavailable;
    };

    if source_size != destination_size {
        return DecisionReason::SizeMismatch;
    }

    let (Some(source_hash), Some(destination_hash)) =
        rayon::join(|| hash(source), || hash(destination))
    else {
        return DecisionReason::FingerprintUnavailable;
    };

    if source_hash == destination_hash {
        DecisionReason::FingerprintMatch
    } else {
        DecisionReason::FingerprintMismatch
    }
}

fn decide_link_reason(source: &Path, destination: &Path, overwrite: bool) -> DecisionReason {
    let Ok(metadata) = fs::symlink_metadata(destination) else {
        return DecisionReason::DestinationMissing;
    };

    if !overwrite {
        return DecisionReason::OverwriteDisabled;
    }

    if !metadata.file_type().is_symlink() {
        return DecisionReason::LinkUnavailable;
    }

    match (fs::read_link(source), fs::read_link(destination)) {
        (Ok(source_link), Ok(destination_link)) if source_link == destination_link => {
            DecisionReason::LinkMatch
        }
        (Ok(_), Ok(_)) => DecisionReason::LinkMismatch,
        _ => DecisionReason::LinkUnavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn pair(dir: &TempDir, source: &str, destination: Option<&str>) -> (PathBuf, PathBuf) {
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&src, source).unwrap();
        if let Some(content) = destination {
            fs::write(&dest, content).unwrap();
        }
        (src, dest)
    }

    #[test]
    fn test_identical_content_skips() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("hello"));

        let decision = decide(&src, &dest, true);

        assert!(decision.is_skip());
        assert_eq!(decision.reason, DecisionReason::FingerprintMatch);
    }

    #[test]
    fn test_same_length_different_bytes_copies() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("world"));

        let decision = decide(&src, &dest, true);

        assert_eq!(decision.outcome, ComparisonOutcome::ProceedWithCopy);
        assert_eq!(decision.reason, DecisionReason::FingerprintMismatch);
    }

    #[test]
    fn test_size_mismatch_short_circuits_before_hashing() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("hello!"));

        let decision = decide(&src, &dest, true);

        assert_eq!(decision.reason, DecisionReason::SizeMismatch);
        assert!(!decision.is_skip());
    }

    #[test]
    fn test_empty_files_go_through_fingerprint() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "", Some(""));

        let decision = decide(&src, &dest, true);

        assert_eq!(decision.reason, DecisionReason::FingerprintMatch);
        assert!(should_skip(&src, &dest, true));
    }

    #[test]
    fn test_missing_destination_copies() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", None);

        assert_eq!(
            decide(&src, &dest, true).reason,
            DecisionReason::DestinationMissing
        );
        assert_eq!(
            decide(&src, &dest, false).reason,
            DecisionReason::DestinationMissing
        );
    }

    #[test]
    fn test_overwrite_disabled_skips_differing_content() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("something else"));

        let decision = decide(&src, &dest, false);

        assert!(decision.is_skip());
        assert_eq!(decision.reason, DecisionReason::OverwriteDisabled);
    }

    #[test]
    fn test_missing_source_copies() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("gone.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&dest, "hello").unwrap();

        assert_eq!(
            decide(&src, &dest, true).reason,
            DecisionReason::SizeUnavailable
        );
    }

    #[test]
    fn test_directory_destination_copies() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest");
        fs::write(&src, "hello").unwrap();
        fs::create_dir(&dest).unwrap();

        assert_eq!(
            decide(&src, &dest, true).reason,
            DecisionReason::SizeUnavailable
        );
    }

    #[test]
    fn test_single_byte_difference_in_large_file() {
        let dir = TempDir::new().unwrap();
        let data: Vec<u8> = (0..4 * 1024 * 1024).map(|i| (i % 253) as u8).collect();
        let mut changed = data.clone();
        let last = changed.len() - 1;
        changed[last] ^= 0xff;
        let src = dir.path().join("big.bin");
        let dest = dir.path().join("big-copy.bin");
        fs::write(&src, &data).unwrap();
        fs::write(&dest, &changed).unwrap();

        let started = Instant::now();
        let decision = decide(&src, &dest, true);
        fs::write(&dest, &data).unwrap();
        let second = decide(&src, &dest, true);

        assert_eq!(decision.reason, DecisionReason::FingerprintMismatch);
        assert_eq!(second.reason, DecisionReason::FingerprintMatch);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_unhashable_file_of_equal_size_copies() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("hello"));

        let reason = decide_reason(&src, &dest, true, probe_size, |path| {
            if path == dest {
                None
            } else {
                fingerprint(path)
            }
        });

        assert_eq!(reason, DecisionReason::FingerprintUnavailable);
        assert!(!Decision::from_reason(reason).is_skip());
    }

    #[test]
    fn test_unsized_file_is_never_hashed() {
        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("hello"));

        let reason = decide_reason(
            &src,
            &dest,
            true,
            |_| None,
            |_| panic!("hashed after the size probe failed"),
        );

        assert_eq!(reason, DecisionReason::SizeUnavailable);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_destination_copies() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let (src, dest) = pair(&dir, "hello", Some("hello"));
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores file permissions
        if fs::File::open(&dest).is_ok() {
            return;
        }

        let decision = decide(&src, &dest, true);

        assert_eq!(decision.reason, DecisionReason::FingerprintUnavailable);
        assert!(!decision.is_skip());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_decisions() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src-link");
        let same = dir.path().join("same-link");
        let other = dir.path().join("other-link");
        let plain = dir.path().join("plain.txt");
        symlink("missing/target.txt", &src).unwrap();
        symlink("missing/target.txt", &same).unwrap();
        symlink("elsewhere.txt", &other).unwrap();
        fs::write(&plain, "not a link").unwrap();

        assert_eq!(decide_link(&src, &same, true).reason, DecisionReason::LinkMatch);
        assert!(decide_link(&src, &same, true).is_skip());
        assert_eq!(
            decide_link(&src, &other, true).reason,
            DecisionReason::LinkMismatch
        );
        assert_eq!(
            decide_link(&src, &plain, true).reason,
            DecisionReason::LinkUnavailable
        );
        assert_eq!(
            decide_link(&src, &dir.path().join("absent"), true).reason,
            DecisionReason::DestinationMissing
        );
        assert_eq!(
            decide_link(&src, &other, false).reason,
            DecisionReason::OverwriteDisabled
        );
    }

    #[test]
    fn test_reason_outcomes() {
        assert_eq!(
            DecisionReason::ComparisonDisabled.outcome(),
            ComparisonOutcome::ProceedWithCopy
        );
        assert_eq!(
            DecisionReason::FingerprintUnavailable.outcome(),
            ComparisonOutcome::ProceedWithCopy
        );
        assert_eq!(
            DecisionReason::OverwriteDisabled.outcome(),
            ComparisonOutcome::Skip
        );
    }
}
