//! Latest command

use anyhow::Result;
use pkgidx_core::feed::latest_version_dir;
use std::path::Path;

/// Print the newest version directory under a feed root.
pub fn latest(root: &Path) -> Result<()> {
    let (version, dir) = latest_version_dir(root)?;
    println!("{version}\t{}", dir.display());
    Ok(())
}
