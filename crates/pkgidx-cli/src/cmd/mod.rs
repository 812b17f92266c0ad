//! Subcommand implementations.

pub mod check;
pub mod latest;
pub mod merge;
pub mod show;
