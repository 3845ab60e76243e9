//! Streaming content fingerprints using BLAKE3.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read per chunk. Memory use while hashing is bounded by this.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A 256-bit digest of a file's full contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Convert to a lowercase hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Fingerprint({})", hex.get(..16).unwrap_or(&hex))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fingerprint the file at `path`.
///
/// Returns `None` on any open or read failure, including the file vanishing
/// part way through. Callers treat that as "copy".
#[must_use]
pub fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::trace!("Cannot open {} for hashing: {e}", path.display());
            return None;
        }
    };

    match fingerprint_reader(file) {
        Ok(fingerprint) => Some(fingerprint),
        Err(e) => {
            log::debug!("Failed to hash {}: {e}", path.display());
            None
        }
    }
}

/// Fingerprint everything `reader` yields, one [`CHUNK_SIZE`] chunk at a time.
///
/// # Errors
///
/// * If reading fails with anything other than `Interrupted`
pub fn fingerprint_reader<R: Read>(mut reader: R) -> io::Result<Fingerprint> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Fingerprint(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Reader that fails after yielding some data.
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("disk went away"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(7);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_fingerprint_matches_single_shot_hash() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.bin");
        let data: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        fs::write(&file, &data).unwrap();

        let streamed = fingerprint(&file).unwrap();

        assert_eq!(streamed.as_bytes(), blake3::hash(&data).as_bytes());
    }

    #[test]
    fn test_fingerprint_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty");
        fs::write(&file, "").unwrap();

        assert_eq!(
            fingerprint(&file).unwrap().as_bytes(),
            blake3::hash(&[]).as_bytes()
        );
    }

    #[test]
    fn test_fingerprint_distinguishes_content() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "hello").unwrap();
        fs::write(&b, "world").unwrap();

        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(fingerprint(&dir.path().join("missing")), None);
    }

    #[test]
    fn test_fingerprint_reader_propagates_read_error() {
        let reader = FailingReader {
            remaining: CHUNK_SIZE + 1,
        };
        assert!(fingerprint_reader(reader).is_err());
    }

    #[test]
    fn test_fingerprint_display_is_hex() {
        let fp = fingerprint_reader(&b"hello"[..]).unwrap();
        let hex = fp.to_string();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hex, blake3::hash(b"hello").to_hex().to_string());
    }
}
