//! Summary and listing output formatting
//!
//! The counts table is rendered with comfy-table; platform and tool listings
//! are column-aligned lines.

use super::theme::Theme;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use crossterm::style::Stylize;
use pkgidx_core::IndexListing;
use pkgidx_core::MergeSummary;
use pkgidx_core::report::Counts;

/// Build the input/merged counts table.
pub fn counts_table(summary: &MergeSummary) -> Table {
    let rows: [(&str, Counts); 4] = [
        ("base", summary.original),
        ("update A", summary.update_a),
        ("update B", summary.update_b),
        ("merged", summary.merged),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "platforms", "tools"]);
    for (label, counts) in rows {
        table.add_row(vec![
            label.to_string(),
            counts.platforms.to_string(),
            counts.tools.to_string(),
        ]);
    }
    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Print the counts table followed by the superseded/dropped notes.
pub fn print_counts(summary: &MergeSummary) {
    println!();
    println!("{}", counts_table(summary));
    println!(
        "  {}",
        format!(
            "{} platform(s) replaced by updates, {} base tool(s) dropped",
            summary.superseded_platforms, summary.dropped_tools
        )
        .dark_grey()
    );
}

/// Print architectures with their versions, then tool names with theirs.
pub fn print_listing(listing: &IndexListing) {
    let theme = Theme::default();

    print_group("platforms", &listing.architectures(), &theme);
    print_group("tools", &listing.tool_names(), &theme);
}

fn print_group(title: &str, groups: &[(&str, Vec<&str>)], theme: &Theme) {
    let total: usize = groups.iter().map(|(_, versions)| versions.len()).sum();

    println!();
    println!("  {} {}", title.bold(), format!("({total})").dark_grey());
    for (name, versions) in groups {
        println!("{}", format_row(name, versions, theme));
    }
}

/// One aligned `name  v1, v2` line.
pub fn format_row(name: &str, versions: &[&str], theme: &Theme) -> String {
    let name_part = format!("{:<width$}", name, width = theme.layout.name_width);
    format!(
        "  {} {}",
        name_part.with(theme.colors.primary),
        versions.join(", ").with(theme.colors.version)
    )
}
