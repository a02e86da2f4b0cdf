//! Fixed-width text rendering for `/list-tables` and `/my-tables`.
//!
//! All functions are pure. Widths count Unicode scalar values, which is what a
//! monospace Discord code block aligns on for the common scripts.

use crate::model::{
    settings::ColumnWidths,
    table::{Table, TableRole},
};

/// Smallest width any column is rendered with.
pub const MIN_COLUMN_WIDTH: usize = 4;

/// Discord's limit on message content, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

const TRUNCATION_MARKER: &str = "...";

/// Stand-in for backticks so user text can't close the surrounding code block.
const BACKTICK_REPLACEMENT: char = '\u{02CB}';

/// Which columns a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingColumns {
    /// System, schedule, GM, players.
    Standard,
    /// The standard columns plus the caller's status at each table.
    WithStatus,
}

/// One line of a listing, before padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub system: String,
    pub schedule: String,
    pub gm: String,
    pub seats: String,
    pub status: Option<String>,
}

impl ListingRow {
    /// Builds a row for `table`.
    ///
    /// # Arguments
    /// - `table` - Table to describe
    /// - `gm_name` - Display name already resolved for the GM
    /// - `role` - Caller's role, shown in the status column when present
    pub fn from_table(table: &Table, gm_name: impl Into<String>, role: Option<TableRole>) -> Self {
        Self {
            system: table.system.clone(),
            schedule: table.schedule.clone(),
            gm: gm_name.into(),
            seats: table.seats_label(),
            status: role.map(|r| r.label().to_string()),
        }
    }
}

/// Pads or truncates `value` to exactly `width` characters.
///
/// Values that fit are left-aligned and padded with spaces. Longer values keep
/// their first `width - 3` characters followed by `...`. When `width` is 3 or
/// less there is no room for the marker and the value is cut hard.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(format_cell("Call of Cthulhu", 10), "Call of...");
/// assert_eq!(format_cell("D&D", 6), "D&D   ");
/// ```
pub fn format_cell(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len <= width {
        let mut cell = String::with_capacity(value.len() + (width - len));
        cell.push_str(value);
        cell.extend(std::iter::repeat(' ').take(width - len));
        return cell;
    }

    if width <= TRUNCATION_MARKER.len() {
        return value.chars().take(width).collect();
    }

    let mut cell: String = value
        .chars()
        .take(width - TRUNCATION_MARKER.len())
        .collect();
    cell.push_str(TRUNCATION_MARKER);
    cell
}

/// Formats a row, separating cells with single spaces.
///
/// The status cell is only rendered when the row carries one.
pub fn format_row(row: &ListingRow, widths: &ColumnWidths) -> String {
    let mut cells = vec![
        format_cell(&sanitize(&row.system), widths.system),
        format_cell(&sanitize(&row.schedule), widths.schedule),
        format_cell(&sanitize(&row.gm), widths.gm),
        format_cell(&row.seats, widths.players),
    ];
    if let Some(status) = &row.status {
        cells.push(format_cell(status, widths.status));
    }
    cells.join(" ")
}

/// Renders a full listing inside a code block.
///
/// # Arguments
/// - `rows` - Rows in display order
/// - `widths` - Configured widths; each is raised to at least 4
/// - `columns` - Whether to include the status column
///
/// # Returns
/// - `String` - Header, separator and rows wrapped in a fenced code block
pub fn render_listing(rows: &[ListingRow], widths: &ColumnWidths, columns: ListingColumns) -> String {
    let widths = floor_widths(widths);

    let mut labels = vec![
        pad_label("System", widths.system),
        pad_label("Schedule", widths.schedule),
        pad_label("GM", widths.gm),
        pad_label("Players", widths.players),
    ];
    if columns == ListingColumns::WithStatus {
        labels.push(pad_label("Status", widths.status));
    }
    let header = labels.join(" ");
    let separator = "-".repeat(header.chars().count());

    let mut lines = vec![header, separator];
    lines.extend(rows.iter().map(|row| {
        let row = match columns {
            ListingColumns::Standard => ListingRow {
                status: None,
                ..row.clone()
            },
            ListingColumns::WithStatus => ListingRow {
                status: Some(row.status.clone().unwrap_or_default()),
                ..row.clone()
            },
        };
        format_row(&row, &widths)
    }));

    format!("```\n{}\n```", lines.join("\n"))
}

/// Splits a listing into code blocks of at most `max_len` characters each.
///
/// Every page repeats the header. A row too long for an empty page still gets
/// a page of its own. An empty listing yields one page with just the header.
pub fn render_pages(
    rows: &[ListingRow],
    widths: &ColumnWidths,
    columns: ListingColumns,
    max_len: usize,
) -> Vec<String> {
    if rows.is_empty() {
        return vec![render_listing(rows, widths, columns)];
    }

    let mut pages = Vec::new();
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len()
            && render_listing(&rows[start..=end], widths, columns)
                .chars()
                .count()
                <= max_len
        {
            end += 1;
        }
        pages.push(render_listing(&rows[start..end], widths, columns));
        start = end;
    }
    pages
}

fn floor_widths(widths: &ColumnWidths) -> ColumnWidths {
    ColumnWidths {
        system: widths.system.max(MIN_COLUMN_WIDTH),
        schedule: widths.schedule.max(MIN_COLUMN_WIDTH),
        gm: widths.gm.max(MIN_COLUMN_WIDTH),
        players: widths.players.max(MIN_COLUMN_WIDTH),
        status: widths.status.max(MIN_COLUMN_WIDTH),
    }
}

/// Left-aligns a header label. Labels are padded but never truncated.
fn pad_label(label: &str, width: usize) -> String {
    format!("{:<width$}", label, width = width)
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '`' => BACKTICK_REPLACEMENT,
            '\n' | '\r' | '\t' => ' ',
            c => c,
        })
        .collect()
}
