//! Target planning - turn a loaded config into an ordered list of copy targets.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Component, Path, PathBuf};

use skipcopy_config::{LoadedConfig, TargetConfig};

use crate::error::OperationError;
use crate::target::CopyTarget;

const GLOB_CHARS: &[char] = &['*', '?', '['];

fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_CHARS)
}

/// Leading components of a pattern that contain no glob characters.
fn static_prefix(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|component| match component {
            Component::Normal(part) => !is_glob(&part.to_string_lossy()),
            _ => true,
        })
        .collect()
}

/// Plan the copy targets for a config, in config order.
///
/// Sources are relative to the source root and destinations relative to
/// the destination root. A plain `src` copies to `dest/<file name>`; a glob
/// `src` yields one target per matched regular file.
///
/// # Arguments
///
/// * `config` - The loaded configuration
///
/// # Errors
///
/// * If a glob pattern is invalid
/// * If a plain `src` has no file name
pub fn plan_targets(config: &LoadedConfig) -> Result<Vec<CopyTarget>, OperationError> {
    let source_root = config.source_root();
    let mut targets = Vec::new();

    for entry in &config.config.targets {
        let planned = if is_glob(&entry.src) {
            plan_glob(&source_root, entry)?
        } else {
            vec![plan_single(entry)?]
        };

        targets.extend(planned.into_iter().map(|target| apply_overrides(config, entry, target)));
    }

    log::debug!(
        "Planned {} targets from {}",
        targets.len(),
        config.config_path.display()
    );

    Ok(targets)
}

fn plan_single(entry: &TargetConfig) -> Result<CopyTarget, OperationError> {
    let source = Path::new(&entry.src);
    let file_name = source
        .file_name()
        .ok_or_else(|| OperationError::InvalidSource(entry.src.clone()))?;

    Ok(CopyTarget::new(source, Path::new(&entry.dest).join(file_name)))
}

fn plan_glob(source_root: &Path, entry: &TargetConfig) -> Result<Vec<CopyTarget>, OperationError> {
    let escaped_root = glob::Pattern::escape(&source_root.to_string_lossy());
    let full_pattern = Path::new(&escaped_root).join(&entry.src);
    let prefix_dir = source_root.join(static_prefix(&entry.src));

    let mut targets = Vec::new();

    for matched in glob::glob(&full_pattern.to_string_lossy())? {
        let source = match matched {
            Ok(path) => path,
            Err(e) => {
                log::debug!("Skipping unreadable glob match: {e}");
                continue;
            }
        };

        if !source.is_file() {
            continue;
        }

        let relative = if entry.flatten {
            source.file_name().map(PathBuf::from)
        } else {
            source.strip_prefix(&prefix_dir).ok().map(Path::to_path_buf)
        };

        let Some(relative) = relative else {
            log::debug!("Skipping glob match {}", source.display());
            continue;
        };

        let destination = Path::new(&entry.dest).join(relative);
        targets.push(CopyTarget::new(
            relative_to_root(source_root, &source),
            destination,
        ));
    }

    if targets.is_empty() {
        log::warn!("Pattern {} matched no files", entry.src);
    }

    Ok(targets)
}

/// A glob match as a path relative to the source root, like a plain `src`.
fn relative_to_root(source_root: &Path, matched: &Path) -> PathBuf {
    let root = path_clean::clean(source_root);
    let matched = path_clean::clean(matched);

    match matched.strip_prefix(&root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => matched,
    }
}

fn apply_overrides(config: &LoadedConfig, entry: &TargetConfig, target: CopyTarget) -> CopyTarget {
    let target = target
        .with_preserve_timestamps(
            entry
                .preserve_timestamps
                .unwrap_or(config.config.preserve_timestamps),
        )
        .with_dereference_symlinks(
            entry
                .dereference_symlinks
                .unwrap_or(config.config.dereference_symlinks),
        );

    match entry.overwrite {
        Some(overwrite) => target.with_overwrite(overwrite),
        None => target,
    }
}
