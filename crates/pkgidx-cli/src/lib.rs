//! pkgidx - package index merger
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Folds the newest release of two update feeds into a canonical aggregate
//! package index.
//!
//! # Layout
//!
//! ```text
//! pkgidx.toml
//! package_index.json          # canonical aggregate, rewritten in place
//! feeds/
//! ├── esp32/3.0.1/package_esp32_index.json
//! └── esp8266/3.1.2/package_esp8266_index.json
//! ```

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use pkgidx_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pkgidx")]
#[command(author, version = env!("PKGIDX_VERSION"), about = "pkgidx - merge package index update feeds")]
pub struct Cli {
    /// Show what would happen without writing the output
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge the newest feed releases into the base index
    Merge {
        /// Run configuration
        #[arg(short, long, env = "PKGIDX_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Override the base index from the config
        #[arg(long)]
        base: Option<PathBuf>,
        /// Override the output path from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate index documents (shape and duplicate entries)
    Check {
        /// Index files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the platforms and tools of an index
    Show {
        /// Index file
        file: PathBuf,
    },
    /// Print the newest version directory under a feed root
    Latest {
        /// Feed root directory
        root: PathBuf,
    },
}
