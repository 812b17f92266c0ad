//! Shared types for package index documents.
//!
//! A package index advertises installable platforms (board support packages,
//! keyed by architecture and version) and tools (toolchain components, keyed
//! by name and version). This crate holds the document model, the composite
//! keys used to deduplicate entries, and the merge of an aggregate index with
//! two update feeds. Nothing here touches the filesystem except
//! [`PackageIndex::load`].

pub mod error;
pub mod index;
pub mod key;
pub mod merge;

// Re-exports
pub use error::IndexError;
pub use index::{Package, PackageIndex, Platform, Tool};
pub use key::{EntryKey, Keyed};
pub use merge::merge;
