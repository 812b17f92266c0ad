//! End-to-end merge run.
//!
//! 1. Check the canonical aggregate exists.
//! 2. Locate the newest release of both update feeds.
//! 3. Stage all three documents in a transient directory.
//! 4. Parse them.
//! 5. Merge.
//! 6. Commit atomically (skipped on dry runs).
//! 7. Summarise.

use crate::commit::{CommitOutcome, commit};
use crate::config::MergeConfig;
use crate::error::PipelineError;
use crate::feed::{FeedLocation, locate};
use crate::report::{MergeSummary, Reporter};
use crate::stage::Staging;
use pkgidx_schema::{PackageIndex, merge};
use std::path::Path;

/// Knobs that do not belong in the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Merge and validate, but leave the output file alone.
    pub dry_run: bool,
}

/// What a run did.
#[derive(Debug)]
pub struct RunOutcome {
    /// The two feeds, in priority order.
    pub feeds: Vec<FeedLocation>,
    /// Counts and listings of the merge.
    pub summary: MergeSummary,
    /// Where the result went; `None` on dry runs.
    pub committed: Option<CommitOutcome>,
}

/// Run a full merge as described by `config`.
///
/// The staging directory is removed before this returns, on success and on
/// every error path.
///
/// # Errors
///
/// Returns [`PipelineError::MissingBase`] if the aggregate does not exist,
/// [`PipelineError::MissingInputFile`] if a feed cannot be located,
/// [`PipelineError::Index`] if an input fails to parse, and
/// [`PipelineError::Merge`] if the merged document fails validation. The
/// output file is untouched in all of these cases.
pub fn run(
    config: &MergeConfig,
    options: RunOptions,
    reporter: &dyn Reporter,
) -> Result<RunOutcome, PipelineError> {
    config.validate()?;

    if !config.base.is_file() {
        return Err(PipelineError::MissingBase {
            path: config.base.clone(),
        });
    }

    reporter.section("Locating feeds");
    let feeds = config
        .feeds
        .iter()
        .map(locate)
        .collect::<Result<Vec<_>, _>>()?;
    for feed in &feeds {
        reporter.info(&format!(
            "{} {} ({})",
            feed.name,
            feed.version,
            feed.file.display()
        ));
    }

    let staging = Staging::new(config.staging_dir.as_deref())?;
    let base_path = staging.stage(&config.base, "base")?;
    let feed_paths = feeds
        .iter()
        .map(|feed| staging.stage(&feed.file, &feed.name))
        .collect::<Result<Vec<_>, _>>()?;

    reporter.section("Merging");
    let original = load(&base_path, &config.base)?;
    let update_a = load(&feed_paths[0], &feeds[0].file)?;
    let update_b = load(&feed_paths[1], &feeds[1].file)?;

    let merged = merge(&original, &update_a, &update_b)?;
    let summary = MergeSummary::compute(&original, &update_a, &update_b, &merged)?;
    tracing::debug!(
        "Merged {} platforms and {} tools",
        summary.merged.platforms,
        summary.merged.tools
    );
    if summary.dropped_tools > 0 {
        reporter.warning(&format!(
            "{} tool(s) from the base index are not in either feed and were dropped",
            summary.dropped_tools
        ));
    }

    let output = config.output_path();
    let committed = if options.dry_run {
        reporter.info(&format!("Dry run: not writing {}", output.display()));
        None
    } else {
        let outcome = commit(&merged, output)?;
        reporter.success(&format!("Wrote {}", outcome.path.display()));
        Some(outcome)
    };

    drop(staging);
    reporter.summary(&summary);

    Ok(RunOutcome {
        feeds,
        summary,
        committed,
    })
}

/// Parse a staged copy, attributing errors to the original location.
fn load(staged: &Path, origin: &Path) -> Result<PackageIndex, PipelineError> {
    PackageIndex::load(staged).map_err(|source| PipelineError::Index {
        path: origin.to_path_buf(),
        source,
    })
}
