//! Configuration file discovery.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["skipcopy.config.toml", "skipcopy.config.json"];

/// Find the configuration file in `dir`.
///
/// TOML wins when both formats are present.
///
/// # Errors
///
/// * If no configuration file exists in `dir`
pub fn discover_config(dir: &Path) -> Result<PathBuf, ConfigError> {
    log::debug!("Discovering config in {}", dir.display());

    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))
}
