//! Configuration loading for skipcopy.
//!
//! A config names the source and destination roots, the targets to copy and
//! the batch options. Both TOML (`skipcopy.config.toml`) and JSON
//! (`skipcopy.config.json`) are supported.
//!
//! # Example
//!
//! ```rust,ignore
//! use skipcopy_config::{discover_config, load_config};
//!
//! let path = discover_config(&cwd)?;
//! let loaded = load_config(&path)?;
//! println!("{} targets", loaded.config.targets.len());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod json_loader;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_FILE_NAMES, discover_config};
pub use error::ConfigError;
pub use json_loader::load_json_config;
pub use toml_loader::load_toml_config;
pub use types::{Config, LoadedConfig, TargetConfig};

use std::path::Path;

/// Load a configuration file, auto-detecting the format based on extension.
///
/// # Errors
///
/// * If the file extension is not supported
/// * If the file cannot be read
/// * If the file cannot be parsed
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let config = match extension {
        "toml" => load_toml_config(path)?,
        "json" => load_json_config(path)?,
        _ => return Err(ConfigError::UnsupportedFormat(extension.to_string())),
    };

    let config_dir = path
        .parent()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?
        .to_path_buf();

    Ok(LoadedConfig {
        config,
        config_path: path.to_path_buf(),
        config_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_detects_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skipcopy.config.toml");
        fs::write(&path, "sourceRoot = \"public\"\n").unwrap();

        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.config.source_root, "public");
        assert_eq!(loaded.config_dir, dir.path());
        assert_eq!(loaded.source_root(), dir.path().join("public"));
    }

    #[test]
    fn test_load_config_unsupported() {
        let err = load_config(Path::new("skipcopy.config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "yaml"));
    }
}
