//! pkgidx - package index merger CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pkgidx_cli::cmd;
use pkgidx_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Merge {
            config,
            base,
            output,
        } => cmd::merge::merge(&config, base, output, dry_run, quiet),
        Commands::Check { files } => cmd::check::check(&files, quiet),
        Commands::Show { file } => cmd::show::show(&file),
        Commands::Latest { root } => cmd::latest::latest(&root),
    }
}
