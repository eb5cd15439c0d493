//! Output formatting for the CLI.

use crate::core::controller::ListView;
use crate::core::error::Result;
use crate::core::item::Item;

/// Status glyph for a row.
fn format_status(done: bool) -> &'static str {
    if done {
        "✓"
    } else {
        "○"
    }
}

/// Format one row.
pub fn format_item(item: &Item) -> String {
    format!("  [{}] {} {}", item.id, format_status(item.done), item.value)
}

/// Format a list: heading, then one row per item.
pub fn format_view(view: &ListView<'_>) -> String {
    let mut out = String::new();
    out.push_str(view.heading);
    out.push('\n');
    for item in view.rows {
        out.push_str(&format_item(item));
        out.push('\n');
    }
    out
}

/// Format every non-empty list, separated by a blank line. Empty input
/// yields an empty string.
pub fn format_views(views: &[ListView<'_>]) -> String {
    views
        .iter()
        .map(format_view)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format items as a JSON array.
pub fn format_json(items: &[&Item]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}
