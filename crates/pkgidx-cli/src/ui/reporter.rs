//! Console implementation of the core `Reporter`.

use super::list;
use super::theme::Theme;
use crossterm::style::Stylize;
use pkgidx_core::{MergeSummary, Reporter};

/// Prints progress to stdout and errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    quiet: bool,
    theme: Theme,
}

impl ConsoleReporter {
    /// Create a reporter; `quiet` keeps warnings, errors, and counts only.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            theme: Theme::default(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, title: &str) {
        if !self.quiet {
            println!();
            println!("{}", title.bold());
        }
    }

    fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.with(self.theme.colors.secondary));
        }
    }

    fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.with(self.theme.colors.success));
        }
    }

    fn warning(&self, msg: &str) {
        eprintln!("  {} {msg}", "warn:".with(self.theme.colors.warning).bold());
    }

    fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "error:".with(self.theme.colors.error).bold());
    }

    fn summary(&self, summary: &MergeSummary) {
        list::print_counts(summary);
        if !self.quiet {
            list::print_listing(&summary.listing);
        }
    }
}
