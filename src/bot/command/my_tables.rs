use serenity::all::{CommandInteraction, Context, CreateCommand};
use std::collections::HashSet;

use crate::{
    bot::{
        permission::NameResolver,
        respond::{self, Responder},
    },
    error::AppError,
    service::format::{render_pages, ListingColumns, ListingRow, MESSAGE_LIMIT},
    state::AppState,
};

pub const NAME: &str = "my-tables";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Shows tables you run or play in.")
}

/// Privately lists the tables the user runs, plays in or waits for.
///
/// In a server only that server's tables are shown. In a DM the listing is
/// refused when the tables span several servers, since GM names are resolved
/// per server.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let user_id = command.user.id.get();
    let responder = Responder::Command(command);

    let mut entries = state.store.tables_for_user(user_id).await;

    match command.guild_id {
        Some(guild_id) => entries.retain(|(table, _)| table.guild_id == Some(guild_id.get())),
        None => {
            let guilds: HashSet<Option<u64>> =
                entries.iter().map(|(table, _)| table.guild_id).collect();
            if guilds.len() > 1 {
                respond::reply_ephemeral(
                    ctx,
                    responder,
                    "You have tables on multiple servers. Please run /my-tables in the server you want to see.",
                )
                .await;
                return Ok(());
            }
        }
    }

    if entries.is_empty() {
        respond::reply_ephemeral(
            ctx,
            responder,
            "You are not currently running or signed up for any tables.",
        )
        .await;
        return Ok(());
    }

    let mut names = NameResolver::new(ctx);
    let mut rows = Vec::with_capacity(entries.len());
    for (table, role) in &entries {
        let gm = names.display_name(table.gm_id, table.guild_id).await;
        rows.push(ListingRow::from_table(table, gm, Some(*role)));
    }

    let pages = render_pages(
        &rows,
        &state.settings.my_tables,
        ListingColumns::WithStatus,
        MESSAGE_LIMIT,
    );
    let mut pages = pages.into_iter();

    if let Some(first) = pages.next() {
        if !respond::reply_ephemeral(ctx, responder, first).await {
            return Ok(());
        }
    }
    for page in pages {
        respond::followup_ephemeral(ctx, responder, page).await;
    }

    tracing::info!(
        "Displayed {} table(s) for /my-tables to {} ({})",
        entries.len(),
        command.user.name,
        command.user.id
    );
    Ok(())
}
