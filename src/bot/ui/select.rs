//! Select menus listing tables for `/archive-table` and `/edit-table`.

use serenity::all::{CreateActionRow, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption};

use crate::{
    bot::ui::{custom_id::CustomId, truncate},
    model::table::Table,
};

/// Discord's limits on select menus.
const MAX_OPTIONS: usize = 25;
const LABEL_LIMIT: usize = 100;

/// Builds a single-choice menu with one option per table.
///
/// Only the first 25 tables are offered; the option value is the table id.
///
/// # Arguments
/// - `custom_id` - `CustomId::ArchiveSelect` or `CustomId::EditSelect`
/// - `placeholder` - Text shown before a choice is made
/// - `tables` - Tables in display order
pub fn table_select(custom_id: CustomId, placeholder: &str, tables: &[Table]) -> CreateActionRow {
    let options = tables
        .iter()
        .take(MAX_OPTIONS)
        .map(|table| {
            CreateSelectMenuOption::new(option_label(table), table.id.clone())
                .description(truncate(&format!("System: {}", table.system), LABEL_LIMIT))
        })
        .collect();

    CreateActionRow::SelectMenu(
        CreateSelectMenu::new(custom_id.to_string(), CreateSelectMenuKind::String { options })
            .placeholder(placeholder),
    )
}

/// Infos followed by the last four characters of the id, so tables with
/// similar descriptions can be told apart.
fn option_label(table: &Table) -> String {
    let suffix_start = table
        .id
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(index, _)| index);
    let label = format!("{} ({})", table.info, &table.id[suffix_start..]);
    truncate(&label, LABEL_LIMIT)
}
