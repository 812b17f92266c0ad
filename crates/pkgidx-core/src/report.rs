//! Reporter trait for dependency injection, and merge summaries.
//!
//! The pipeline reports progress through [`Reporter`] so it is not coupled to
//! a specific terminal UI. [`MergeSummary`] carries the counts and listings
//! printed after a merge.

use pkgidx_schema::{EntryKey, IndexError, Keyed, Package, PackageIndex};
use std::collections::HashSet;

/// Sink for user-facing progress messages.
pub trait Reporter {
    /// Indicates a new phase has started (e.g. "Locating feeds").
    fn section(&self, title: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);

    /// Display the final merge summary.
    fn summary(&self, summary: &MergeSummary);
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
    fn summary(&self, _: &MergeSummary) {}
}

/// Platform and tool counts of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// Number of platform entries.
    pub platforms: usize,
    /// Number of tool entries.
    pub tools: usize,
}

impl Counts {
    /// Counts for a package.
    pub fn of(package: &Package) -> Self {
        Self {
            platforms: package.platforms.len(),
            tools: package.tools.len(),
        }
    }
}

/// Keys of every platform and tool in a package, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexListing {
    /// (architecture, version) of each platform.
    pub platforms: Vec<EntryKey>,
    /// (name, version) of each tool.
    pub tools: Vec<EntryKey>,
}

impl IndexListing {
    /// List a package's entries.
    pub fn of(package: &Package) -> Self {
        Self {
            platforms: package.platforms.iter().map(Keyed::key).collect(),
            tools: package.tools.iter().map(Keyed::key).collect(),
        }
    }

    /// Platforms grouped by architecture, groups in first-seen order.
    pub fn architectures(&self) -> Vec<(&str, Vec<&str>)> {
        group(&self.platforms)
    }

    /// Tools grouped by name, groups in first-seen order.
    pub fn tool_names(&self) -> Vec<(&str, Vec<&str>)> {
        group(&self.tools)
    }
}

fn group(keys: &[EntryKey]) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for key in keys {
        match groups.iter_mut().find(|(primary, _)| *primary == key.primary()) {
            Some((_, versions)) => versions.push(key.version()),
            None => groups.push((key.primary(), vec![key.version()])),
        }
    }
    groups
}

/// What a merge consumed and produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// The canonical aggregate before merging.
    pub original: Counts,
    /// First update feed.
    pub update_a: Counts,
    /// Second update feed.
    pub update_b: Counts,
    /// The merged result.
    pub merged: Counts,
    /// Original platforms replaced by an update entry with the same key.
    pub superseded_platforms: usize,
    /// Original tools absent from the merged result.
    pub dropped_tools: usize,
    /// Entries of the merged result.
    pub listing: IndexListing,
}

impl MergeSummary {
    /// Summarise a completed merge.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MalformedInput`] if any document has no first
    /// package.
    pub fn compute(
        original: &PackageIndex,
        update_a: &PackageIndex,
        update_b: &PackageIndex,
        merged: &PackageIndex,
    ) -> Result<Self, IndexError> {
        let (base, a, b, out) = (
            original.primary()?,
            update_a.primary()?,
            update_b.primary()?,
            merged.primary()?,
        );

        let update_keys: HashSet<EntryKey> = a
            .platforms
            .iter()
            .chain(&b.platforms)
            .map(Keyed::key)
            .collect();
        let superseded_platforms = base
            .platforms
            .iter()
            .filter(|p| update_keys.contains(&p.key()))
            .count();

        let merged_tools: HashSet<EntryKey> = out.tools.iter().map(Keyed::key).collect();
        let dropped_tools = base
            .tools
            .iter()
            .filter(|t| !merged_tools.contains(&t.key()))
            .count();

        Ok(Self {
            original: Counts::of(base),
            update_a: Counts::of(a),
            update_b: Counts::of(b),
            merged: Counts::of(out),
            superseded_platforms,
            dropped_tools,
            listing: IndexListing::of(out),
        })
    }
}
