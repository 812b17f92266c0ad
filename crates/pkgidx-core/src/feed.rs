//! Update feed discovery.
//!
//! A feed root holds one directory per release, named by version:
//!
//! ```text
//! feeds/esp32/
//! ├── 2.0.9/package_esp32_index.json
//! ├── 2.0.10/package_esp32_index.json
//! └── 3.0.0-rc1/package_esp32_index.json
//! ```
//!
//! The newest directory by semantic-version ordering wins (`2.0.10` beats
//! `2.0.9`). Names that are not versions are ignored.

use crate::config::FeedSource;
use crate::error::PipelineError;
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a feed's newest index lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLocation {
    /// Feed label from the config.
    pub name: String,
    /// Version parsed from the directory name.
    pub version: Version,
    /// The version directory itself.
    pub dir: PathBuf,
    /// The index file inside it.
    pub file: PathBuf,
}

/// Parse a directory name as a release version.
///
/// Accepts an optional leading `v` and reads two-part names (`1.2`) as
/// `1.2.0`.
pub fn parse_dir_version(name: &str) -> Option<Version> {
    let trimmed = name.strip_prefix('v').unwrap_or(name);
    if let Ok(v) = Version::parse(trimmed) {
        return Some(v);
    }

    let (core, rest) = match trimmed.find(['-', '+']) {
        Some(pos) => trimmed.split_at(pos),
        None => (trimmed, ""),
    };
    if core.split('.').count() == 2 {
        return Version::parse(&format!("{core}.0{rest}")).ok();
    }
    None
}

/// Find the newest version-named subdirectory of `root`.
///
/// When two names parse to the same version the lexically greater name wins,
/// so the choice does not depend on directory listing order.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInputFile`] if `root` cannot be read or
/// contains no version-named directory.
pub fn latest_version_dir(root: &Path) -> Result<(Version, PathBuf), PipelineError> {
    let entries = fs::read_dir(root).map_err(|e| {
        tracing::debug!("Cannot read feed root {}: {e}", root.display());
        PipelineError::missing("feed directory", root)
    })?;

    let mut best: Option<(Version, PathBuf)> = None;
    for entry in entries.filter_map(std::result::Result::ok) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(version) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_dir_version)
        else {
            tracing::trace!("Skipping non-version entry {}", path.display());
            continue;
        };

        // Equal versions (`v1.0.0` and `1.0.0`) fall back to the directory name
        let newer = best.as_ref().is_none_or(|(current, current_dir)| {
            (&version, path.file_name()) > (current, current_dir.file_name())
        });
        if newer {
            best = Some((version, path));
        }
    }

    best.ok_or_else(|| PipelineError::missing("version directory", root))
}

/// Locate the newest index file for a feed.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInputFile`] if no version directory exists
/// or the expected file is absent from the newest one.
pub fn locate(feed: &FeedSource) -> Result<FeedLocation, PipelineError> {
    let (version, dir) = latest_version_dir(&feed.root)?;
    let file = dir.join(&feed.file);
    if !file.is_file() {
        return Err(PipelineError::missing(
            format!("index file for feed '{}' ({version})", feed.name),
            file,
        ));
    }

    tracing::debug!("Feed {} resolved to {} ({version})", feed.name, file.display());
    Ok(FeedLocation {
        name: feed.name.clone(),
        version,
        dir,
        file,
    })
}
