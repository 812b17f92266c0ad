//! Show command

use crate::ui::Theme;
use crate::ui::list;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use pkgidx_core::IndexListing;
use pkgidx_schema::PackageIndex;
use serde_json::Value;
use std::path::Path;

/// Print package metadata and the platform/tool listing of an index.
pub fn show(path: &Path) -> Result<()> {
    let index =
        PackageIndex::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let package = index.primary()?;
    let theme = Theme::default();
    let lw = theme.layout.label_width;

    println!();
    println!("  {}", display_value(&package.name).white().bold());
    for (label, value) in [
        ("maintainer", &package.maintainer),
        ("website", &package.website_url),
        ("help", &package.help),
    ] {
        if !value.is_null() {
            println!("  {label:<lw$}{}", display_value(value));
        }
    }

    list::print_listing(&IndexListing::of(package));
    Ok(())
}

/// Strings print bare; anything else prints as compact JSON.
fn display_value(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}
