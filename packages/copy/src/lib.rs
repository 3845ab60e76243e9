//! Copy primitive used by skipcopy once a target has been judged stale.
//!
//! This crate provides:
//!
//! * Atomic single-file copies (stage into a sibling temp file, then rename)
//! * Copy-on-write support via `reflink-copy` (APFS, Btrfs, `ReFS`)
//! * Recursive directory copies with `jwalk` enumeration and `rayon` copying
//! * Symlink recreation or dereferencing
//! * Optional timestamp preservation via `filetime`
//!
//! # Example
//!
//! ```rust,ignore
//! use skipcopy_copy::{copy_path, CopyOptions};
//!
//! copy_path(source, target, &CopyOptions {
//!     preserve_timestamps: true,
//!     ..Default::default()
//! })?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod error;

pub use copy::{CopyOptions, CopyResult, copy_directory, copy_file, copy_path};
pub use error::CopyError;
