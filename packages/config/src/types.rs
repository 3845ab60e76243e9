//! Configuration types for skipcopy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

fn default_source_root() -> String {
    ".".to_string()
}

fn default_destination_root() -> String {
    "dist".to_string()
}

/// One entry of the `targets` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    /// Source file or glob pattern (relative to the source root).
    pub src: String,

    /// Destination directory (relative to the destination root).
    pub dest: String,

    /// Replace an existing destination whose contents differ.
    #[serde(default)]
    pub overwrite: Option<bool>,

    /// Override the batch-wide `preserveTimestamps`.
    #[serde(default)]
    pub preserve_timestamps: Option<bool>,

    /// Override the batch-wide `dereferenceSymlinks`.
    #[serde(default)]
    pub dereference_symlinks: Option<bool>,

    /// Place glob matches directly in `dest` instead of keeping their path
    /// below the pattern's static prefix.
    #[serde(default = "default_true")]
    pub flatten: bool,
}

/// skipcopy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory sources are resolved against (relative to the config file).
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Directory destinations are resolved against (relative to the config file).
    #[serde(default = "default_destination_root")]
    pub destination_root: String,

    /// Files to copy, in order.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,

    /// Only report failures and the summary.
    #[serde(default)]
    pub quiet: bool,

    /// Skip targets whose destination already matches. When off, every
    /// target is copied.
    #[serde(default = "default_true")]
    pub hash_optimization: bool,

    /// Record failed targets and keep going instead of stopping.
    #[serde(default)]
    pub continue_on_error: bool,

    /// Number of targets processed at once. `0` means one per CPU.
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Default for targets that don't set `preserveTimestamps`.
    #[serde(default)]
    pub preserve_timestamps: bool,

    /// Default for targets that don't set `dereferenceSymlinks`.
    #[serde(default)]
    pub dereference_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            destination_root: default_destination_root(),
            targets: Vec::new(),
            quiet: false,
            hash_optimization: true,
            continue_on_error: false,
            jobs: None,
            preserve_timestamps: false,
            dereference_symlinks: false,
        }
    }
}

/// A loaded configuration with metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: Config,
    /// Path to the configuration file.
    pub config_path: PathBuf,
    /// Directory containing the configuration file.
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// The source root, resolved against the config directory.
    #[must_use]
    pub fn source_root(&self) -> PathBuf {
        resolve(&self.config_dir, &self.config.source_root)
    }

    /// The destination root, resolved against the config directory.
    #[must_use]
    pub fn destination_root(&self) -> PathBuf {
        resolve(&self.config_dir, &self.config.destination_root)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
