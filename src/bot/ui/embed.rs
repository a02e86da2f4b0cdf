//! Embed and buttons that display a table.

use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
};

use crate::{
    bot::ui::{custom_id::CustomId, truncate},
    model::table::Table,
};

/// Discord's limit on an embed field value.
const FIELD_VALUE_LIMIT: usize = 1024;

const ARCHIVED_PREFIX: &str = "[ARCHIVED] ";
const ARCHIVED_COLOUR: Colour = Colour::new(0x99AAB5);

/// Builds the embed for `table`.
///
/// Archived tables keep their content but get a grey colour and a title prefix.
pub fn table_embed(table: &Table) -> CreateEmbed {
    let (players_name, players_value) = players_field(table);
    let (waitlist_name, waitlist_value) = waitlist_field(table);

    let colour = if table.is_active() {
        Colour::DARK_PURPLE
    } else {
        ARCHIVED_COLOUR
    };

    CreateEmbed::new()
        .title(embed_title(table))
        .colour(colour)
        .field("⏰ Schedule", table.schedule.clone(), true)
        .field("🧙 GM", format!("<@{}>", table.gm_id), true)
        .field("📜 Infos", table.info.clone(), false)
        .field(players_name, players_value, false)
        .field(waitlist_name, waitlist_value, false)
        .footer(CreateEmbedFooter::new(format!("Table ID: {}", table.id)))
}

/// Sign-up and leave buttons for `table`; none once it is archived.
///
/// The join button reads "Join Waitlist" while every seat is taken.
pub fn table_buttons(table: &Table) -> Vec<CreateActionRow> {
    if !table.is_active() {
        return Vec::new();
    }

    let join = CreateButton::new(CustomId::Join(table.id.clone()).to_string()).emoji('⚔');
    let join = if table.is_full() {
        join.label("Join Waitlist").style(ButtonStyle::Secondary)
    } else {
        join.label("Sign Up").style(ButtonStyle::Success)
    };

    let leave = CreateButton::new(CustomId::Leave(table.id.clone()).to_string())
        .label("Leave")
        .style(ButtonStyle::Danger)
        .emoji('🏳');

    vec![CreateActionRow::Buttons(vec![join, leave])]
}

fn embed_title(table: &Table) -> String {
    let title = format!("🎲 {}", table.system);
    if table.is_active() {
        title
    } else {
        format!("{}{}", ARCHIVED_PREFIX, title)
    }
}

fn players_field(table: &Table) -> (String, String) {
    let name = format!("Players ({}/{})", table.players.len(), table.max_players);
    (name, mention_list(&table.players, "No players yet."))
}

fn waitlist_field(table: &Table) -> (String, String) {
    let name = format!("Waitlist ({})", table.waiting_list.len());
    (name, mention_list(&table.waiting_list, "No one waiting."))
}

/// One bulleted mention per line, cut to fit an embed field.
fn mention_list(user_ids: &[u64], empty: &str) -> String {
    if user_ids.is_empty() {
        return empty.to_string();
    }

    let list = user_ids
        .iter()
        .map(|id| format!("• <@{}>", id))
        .collect::<Vec<_>>()
        .join("\n");
    truncate(&list, FIELD_VALUE_LIMIT)
}
