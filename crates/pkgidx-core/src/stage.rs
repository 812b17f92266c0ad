//! Transient working directory for one merge run.
//!
//! Inputs are copied here before parsing so a feed that is republished
//! mid-run cannot change under us. The directory and everything in it are
//! removed when the [`Staging`] value is dropped, whichever way the run ends.

use crate::error::PipelineError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A staging directory, deleted on drop.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
}

impl Staging {
    /// Create a fresh staging directory under `parent`, or under the system
    /// temp dir when `parent` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the directory cannot be created.
    pub fn new(parent: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pkgidx-stage-");
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| PipelineError::io("Failed to create staging directory", e))?;

        tracing::debug!("Staging in {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Path of the staging directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy `src` into the staging directory as `<label>-<file name>`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInputFile`] if `src` does not exist and
    /// [`PipelineError::Io`] if the copy fails.
    pub fn stage(&self, src: &Path, label: &str) -> Result<PathBuf, PipelineError> {
        if !src.is_file() {
            return Err(PipelineError::missing(format!("{label} index"), src));
        }

        let file_name = src
            .file_name()
            .map_or_else(|| "index.json".into(), |n| n.to_string_lossy());
        let dest = self
            .dir
            .path()
            .join(format!("{}-{file_name}", sanitize(label)));

        std::fs::copy(src, &dest).map_err(|e| {
            PipelineError::io(
                format!("Failed to stage {} -> {}", src.display(), dest.display()),
                e,
            )
        })?;
        tracing::trace!("Staged {} as {}", src.display(), dest.display());
        Ok(dest)
    }
}

/// Keep labels usable as a file-name component.
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
