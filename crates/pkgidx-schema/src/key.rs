//! Composite keys identifying platform and tool entries.

use std::collections::HashSet;
use std::fmt;

/// Identity of an index entry: a primary attribute paired with a version.
///
/// For platforms the primary attribute is `architecture`, for tools it is
/// `name`. Two entries with equal keys describe the same release and must
/// not both appear in one list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    primary: String,
    version: String,
}

impl EntryKey {
    /// Create a key from its two components.
    pub fn new(primary: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            version: version.into(),
        }
    }

    /// The architecture (platforms) or name (tools) component.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The version component.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.primary, self.version)
    }
}

/// Anything that can be identified by an [`EntryKey`].
pub trait Keyed {
    /// Compute this entry's composite key.
    fn key(&self) -> EntryKey;
}

impl<T: Keyed + ?Sized> Keyed for &T {
    fn key(&self) -> EntryKey {
        (**self).key()
    }
}

/// Drop every item whose key was already seen, keeping first occurrences in
/// their original order.
pub fn dedup_first<T: Keyed>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.key()))
        .collect()
}

/// Keys that occur more than once in `items`, each reported once, in the
/// order their second occurrence appears.
pub fn find_duplicates<T: Keyed>(items: &[T]) -> Vec<EntryKey> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for key in items.iter().map(Keyed::key) {
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            duplicates.push(key);
        }
    }
    duplicates
}
