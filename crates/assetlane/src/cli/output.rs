//! Output formatting utilities for CLI commands

use assetlane::AssetIdentity;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Column headers matching [`identity_row`].
pub const IDENTITY_HEADERS: &[&str] = &[
    "Base", "Sub", "Type", "Rev", "Ver", "User", "Notes", "Ext",
];

/// Print a table with the given headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", render_table(headers, rows));
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }
    table
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One table row per identity, `-` for missing fields.
pub fn identity_row(identity: &AssetIdentity) -> Vec<String> {
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();
    vec![
        identity.base_name.clone(),
        or_dash(identity.sub_name.as_deref()),
        identity.type_name.clone(),
        or_dash(identity.revision_string()),
        or_dash(identity.version_string()),
        or_dash(identity.user_initials.as_deref()),
        identity.notes.clone(),
        or_dash(identity.extension.as_deref()),
    ]
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
