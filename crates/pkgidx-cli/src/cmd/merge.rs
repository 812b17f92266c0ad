//! Merge command

use crate::ui::ConsoleReporter;
use anyhow::{Context, Result};
use pkgidx_core::{MergeConfig, Reporter, RunOptions};
use std::path::{Path, PathBuf};

/// Merge the newest release of both feeds into the base index.
pub fn merge(
    config_path: &Path,
    base: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let mut config = MergeConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(base) = base {
        config.base = base;
    }
    if let Some(output) = output {
        config.output = Some(output);
    }
    tracing::debug!("Merge config: {config:?}");

    let reporter = ConsoleReporter::new(quiet);
    match pkgidx_core::run(&config, RunOptions { dry_run }, &reporter) {
        Ok(outcome) => {
            if let Some(committed) = outcome.committed {
                tracing::debug!("Wrote {} bytes", committed.bytes);
            }
            Ok(())
        }
        Err(e) => {
            reporter.error(&format!(
                "merge aborted, {} left unchanged",
                config.output_path().display()
            ));
            Err(e.into())
        }
    }
}
