//! Core library for pkgidx.
//!
//! Everything around the merge itself: reading the run configuration,
//! finding the newest release of each update feed, staging inputs in a
//! throwaway directory, committing the merged index atomically, and
//! summarising the result for a [`Reporter`].

pub mod commit;
pub mod config;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod report;
pub mod stage;

pub use config::{FeedSource, MergeConfig};
pub use error::PipelineError;
pub use pipeline::{RunOptions, RunOutcome, run};
pub use report::{Counts, IndexListing, MergeSummary, NullReporter, Reporter};
