//! Run configuration, read from `pkgidx.toml`.
//!
//! ```toml
//! base = "package_index.json"
//! output = "package_index.json"   # optional, defaults to `base`
//! staging_dir = "/var/tmp"        # optional parent for the staging directory
//!
//! [[feed]]
//! name = "esp32"
//! root = "feeds/esp32"
//! file = "package_esp32_index.json"
//!
//! [[feed]]
//! name = "esp8266"
//! root = "feeds/esp8266"
//! file = "package_esp8266_index.json"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use crate::error::PipelineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "pkgidx.toml";

/// Number of update feeds a merge consumes.
pub const FEED_COUNT: usize = 2;

/// Top-level structure of `pkgidx.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Canonical aggregate index; must exist before a run.
    pub base: PathBuf,

    /// Where the merged index is committed. Defaults to `base`.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Parent directory for the transient staging directory. Defaults to
    /// the system temp dir.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,

    /// Update feeds, in priority order: the first beats the second.
    #[serde(rename = "feed", default)]
    pub feeds: Vec<FeedSource>,
}

/// One `[[feed]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedSource {
    /// Label used in reports and staged file names.
    pub name: String,
    /// Directory holding one subdirectory per released version.
    pub root: PathBuf,
    /// Index file expected inside the newest version directory.
    pub file: String,
}

impl MergeConfig {
    /// Read, parse, and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the file cannot be read and
    /// [`PipelineError::Config`] if it is not valid TOML or fails
    /// [`MergeConfig::validate`].
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::io(format!("Failed to read {}", path.display()), e))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, base_dir)
    }

    /// Parse config text, resolving relative paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] on invalid TOML or a failed
    /// [`MergeConfig::validate`].
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self, PipelineError> {
        let mut config: MergeConfig = toml::from_str(content)
            .map_err(|e| PipelineError::Config(format!("Failed to parse config: {e}")))?;

        config.base = resolve_path(base_dir, &config.base);
        config.output = config.output.map(|p| resolve_path(base_dir, &p));
        config.staging_dir = config.staging_dir.map(|p| resolve_path(base_dir, &p));
        for feed in &mut config.feeds {
            feed.root = resolve_path(base_dir, &feed.root);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that exactly two feeds with distinct, usable names are configured.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.feeds.len() != FEED_COUNT {
            return Err(PipelineError::Config(format!(
                "expected exactly {FEED_COUNT} [[feed]] tables, found {}",
                self.feeds.len()
            )));
        }
        for feed in &self.feeds {
            if feed.name.trim().is_empty() {
                return Err(PipelineError::Config("feed name is empty".to_string()));
            }
            if feed.file.trim().is_empty() || feed.file.contains(['/', '\\']) {
                return Err(PipelineError::Config(format!(
                    "feed '{}': `file` must be a plain file name, got '{}'",
                    feed.name, feed.file
                )));
            }
        }
        if self.feeds[0].name == self.feeds[1].name {
            return Err(PipelineError::Config(format!(
                "feed names must differ, both are '{}'",
                self.feeds[0].name
            )));
        }
        Ok(())
    }

    /// Effective output path.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.base)
    }
}

/// Resolve a configured path: absolute paths pass through, relative ones are
/// joined onto `base`.
pub fn resolve_path(base: &Path, raw: &Path) -> PathBuf {
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        base.join(raw)
    }
}
