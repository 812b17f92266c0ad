//! Merge of a canonical aggregate index with two update feeds.
//!
//! Platforms are merged additively: updates replace original entries with the
//! same (architecture, version) and everything else in the original survives.
//! Tools are replaced outright by the union of the two feeds.

use crate::error::IndexError;
use crate::index::{Package, PackageIndex, Platform, Tool};
use crate::key::dedup_first;

/// Merge `update_a` and `update_b` into `original`.
///
/// Package metadata (`name`, `maintainer`, `websiteURL`, `help`) comes from
/// `original.packages[0]` verbatim. On key collisions `update_a` beats
/// `update_b`, and both beat `original`.
///
/// # Errors
///
/// Returns [`IndexError::MalformedInput`] if any input has no first package,
/// or [`IndexError::InvalidOutput`] if the result does not survive a
/// serialize/parse/validate round trip.
pub fn merge(
    original: &PackageIndex,
    update_a: &PackageIndex,
    update_b: &PackageIndex,
) -> Result<PackageIndex, IndexError> {
    let base = original.primary()?;
    let a = update_a.primary()?;
    let b = update_b.primary()?;

    let merged = PackageIndex::single(Package {
        name: base.name.clone(),
        maintainer: base.maintainer.clone(),
        website_url: base.website_url.clone(),
        help: base.help.clone(),
        platforms: merge_platforms(&base.platforms, &a.platforms, &b.platforms),
        tools: merge_tools(&a.tools, &b.tools),
    });

    verify(&merged)?;
    Ok(merged)
}

/// Updates first (deduplicated, `update_a` before `update_b`), then the
/// original entries whose key no update supplied.
pub fn merge_platforms(
    original: &[Platform],
    update_a: &[Platform],
    update_b: &[Platform],
) -> Vec<Platform> {
    dedup_first(update_a.iter().chain(update_b).chain(original))
        .into_iter()
        .cloned()
        .collect()
}

/// Deduplicated union of both feeds; the original tool list plays no part.
pub fn merge_tools(update_a: &[Tool], update_b: &[Tool]) -> Vec<Tool> {
    dedup_first(update_a.iter().chain(update_b))
        .into_iter()
        .cloned()
        .collect()
}

/// Re-read the merged document from its serialized form and validate it.
fn verify(merged: &PackageIndex) -> Result<(), IndexError> {
    let text = merged.to_pretty_json()?;
    let reparsed: PackageIndex = text.parse().map_err(IndexError::invalid_output)?;
    if &reparsed != merged {
        return Err(IndexError::invalid_output(
            "serialized document does not round-trip",
        ));
    }
    reparsed.validate()
}
