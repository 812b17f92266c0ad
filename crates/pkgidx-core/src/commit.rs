//! Atomic replacement of the canonical aggregate.
//!
//! The new document is written to a temporary file next to the destination,
//! flushed, read back, and validated. Only then is it renamed over the
//! destination. If any step fails the temporary file is removed and the
//! destination keeps its previous contents.

use crate::error::PipelineError;
use pkgidx_schema::{IndexError, PackageIndex};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mode for an output file that did not exist before the commit.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Destination that now holds the merged index.
    pub path: PathBuf,
    /// Size of the committed document.
    pub bytes: usize,
}

/// Serialize `index` and atomically replace `dest` with it.
///
/// # Errors
///
/// Returns [`PipelineError::Merge`] wrapping [`IndexError::InvalidOutput`] if
/// the written document fails validation, or [`PipelineError::Io`] if
/// writing or renaming fails.
pub fn commit(index: &PackageIndex, dest: &Path) -> Result<CommitOutcome, PipelineError> {
    let text = index.to_pretty_json()?;
    commit_bytes(text.as_bytes(), dest)
}

/// Atomically replace `dest` with `bytes`, provided they form a valid merged
/// index.
///
/// # Errors
///
/// Same as [`commit`].
pub fn commit_bytes(bytes: &[u8], dest: &Path) -> Result<CommitOutcome, PipelineError> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pkgidx-").suffix(".json.tmp");
    // New destinations get an ordinary world-readable file, subject to the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
    }

    // Same directory as the destination so the final rename stays on one volume
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| PipelineError::io(format!("Failed to create temp file in {}", dir.display()), e))?;

    // The rename replaces the inode, so carry the existing mode over explicitly
    if let Ok(meta) = std::fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| {
                PipelineError::io(format!("Failed to set permissions on {}", tmp.path().display()), e)
            })?;
    }

    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| PipelineError::io(format!("Failed to write {}", tmp.path().display()), e))?;

    let written = std::fs::read(tmp.path())
        .map_err(|e| PipelineError::io(format!("Failed to re-read {}", tmp.path().display()), e))?;
    let parsed = PackageIndex::from_slice(&written).map_err(IndexError::invalid_output)?;
    parsed.validate()?;

    tmp.persist(dest).map_err(|e| {
        PipelineError::io(format!("Failed to replace {}", dest.display()), e.error)
    })?;

    tracing::info!("Committed {} bytes to {}", written.len(), dest.display());
    Ok(CommitOutcome {
        path: dest.to_path_buf(),
        bytes: written.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgidx_schema::Package;
    use tempfile::TempDir;

    fn leftovers(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn replaces_destination() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("package_index.json");
        std::fs::write(&dest, "old").unwrap();

        let index = PackageIndex::single(Package::default());
        let outcome = commit(&index, &dest).unwrap();

        let on_disk = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(on_disk, index.to_pretty_json().unwrap());
        assert_eq!(outcome.bytes, on_disk.len());
        assert!(leftovers(tmp.path()).is_empty());
    }

    #[test]
    fn corrupt_bytes_leave_destination_untouched() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("package_index.json");
        std::fs::write(&dest, "previous").unwrap();

        let err = commit_bytes(b"{\"packages\": [", &dest).unwrap_err();
        assert!(
            matches!(err, PipelineError::Merge(IndexError::InvalidOutput(_))),
            "{err}"
        );
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "previous");
        assert!(leftovers(tmp.path()).is_empty());
    }

    #[test]
    fn duplicate_entries_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("package_index.json");
        std::fs::write(&dest, "previous").unwrap();

        let doc = br#"{"packages":[{"tools":[{"name":"t","version":"1"},{"name":"t","version":"1"}]}]}"#;
        let err = commit_bytes(doc, &dest).unwrap_err();
        assert!(err.to_string().contains("duplicate tool t_1"), "{err}");
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "previous");
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn keeps_destination_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let index = PackageIndex::single(Package::default());
        for expected in [0o644, 0o640] {
            let dest = tmp.path().join(format!("index-{expected:o}.json"));
            std::fs::write(&dest, "old").unwrap();
            std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(expected)).unwrap();

            commit(&index, &dest).unwrap();
            assert_eq!(mode(&dest), expected, "mode of {}", dest.display());
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_destination_follows_umask() {
        let tmp = TempDir::new().unwrap();
        // A plain create is 0o666 minus the umask
        let reference = tmp.path().join("reference");
        std::fs::File::create(&reference).unwrap();

        let dest = tmp.path().join("fresh.json");
        commit(&PackageIndex::single(Package::default()), &dest).unwrap();
        assert_eq!(mode(&dest), NEW_FILE_MODE & mode(&reference));
    }

    #[test]
    fn creates_destination_when_absent() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("fresh.json");
        commit(&PackageIndex::single(Package::default()), &dest).unwrap();
        assert!(dest.is_file());
    }
}
