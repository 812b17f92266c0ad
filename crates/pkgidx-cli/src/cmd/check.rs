//! Check command

use crate::ui::Theme;
use anyhow::{Result, bail};
use crossterm::style::Stylize;
use pkgidx_schema::PackageIndex;
use pkgidx_schema::key::find_duplicates;
use std::path::{Path, PathBuf};

/// Validate each file: it must parse as an index and no package may list the
/// same platform or tool twice.
pub fn check(files: &[PathBuf], quiet: bool) -> Result<()> {
    let theme = Theme::default();
    let mut failed = 0;

    for path in files {
        match check_file(path) {
            Ok(detail) => {
                if !quiet {
                    println!(
                        "  {} {} {}",
                        "ok".with(theme.colors.success),
                        path.display(),
                        detail.with(theme.colors.secondary)
                    );
                }
            }
            Err(problems) => {
                failed += 1;
                for problem in problems {
                    eprintln!(
                        "  {} {}: {problem}",
                        "error".with(theme.colors.error),
                        path.display()
                    );
                }
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} index file(s) failed validation", files.len());
    }
    Ok(())
}

/// Returns a short description on success, every problem found on failure.
fn check_file(path: &Path) -> Result<String, Vec<String>> {
    let index = PackageIndex::load(path).map_err(|e| vec![e.to_string()])?;

    let mut problems = Vec::new();
    let (mut platforms, mut tools) = (0, 0);
    for (i, package) in index.packages.iter().enumerate() {
        platforms += package.platforms.len();
        tools += package.tools.len();
        for key in find_duplicates(&package.platforms) {
            problems.push(format!("packages[{i}]: duplicate platform {key}"));
        }
        for key in find_duplicates(&package.tools) {
            problems.push(format!("packages[{i}]: duplicate tool {key}"));
        }
    }

    if problems.is_empty() {
        Ok(format!(
            "({} package(s), {platforms} platforms, {tools} tools)",
            index.packages.len()
        ))
    } else {
        Err(problems)
    }
}
