//! Decides whether a destination file already matches its source.
//!
//! Comparison is staged from cheap to expensive:
//!
//! * [`probe_size`] reads sizes from metadata
//! * [`fingerprint`] streams the full contents through BLAKE3 in bounded memory
//! * [`decide`] runs both stages for a pair, probing the two sides concurrently
//!
//! Anything that cannot be read yields `None` rather than an error, and any
//! `None` settles on copying.
//!
//! # Example
//!
//! ```rust,ignore
//! use skipcopy_compare::decide;
//!
//! let decision = decide(source, destination, true);
//! if !decision.is_skip() {
//!     println!("copying ({})", decision.reason);
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod decide;
mod fingerprint;
mod probe;

pub use decide::{ComparisonOutcome, Decision, DecisionReason, decide, decide_link, should_skip};
pub use fingerprint::{CHUNK_SIZE, Fingerprint, fingerprint, fingerprint_reader};
pub use probe::probe_size;
