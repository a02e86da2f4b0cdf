use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponseFollowup,
};

use crate::{
    bot::{
        command::visible_tables,
        respond::{self, Responder},
        ui::embed::{table_buttons, table_embed},
    },
    error::AppError,
    state::AppState,
};

pub const NAME: &str = "show-tables";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Shows all active tables.")
}

/// Sends every visible table as its own embed with working buttons.
///
/// Replies are private in a server channel; in a DM nobody else can see them
/// anyway.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let in_guild = command.guild_id.is_some();
    let responder = Responder::Command(command);
    let tables = visible_tables(state, ctx, command).await;

    if tables.is_empty() {
        respond::reply(
            ctx,
            responder,
            "There are currently no active tables in this context.",
            in_guild,
        )
        .await;
        return Ok(());
    }

    let summary = if in_guild {
        format!(
            "Found {} active table(s) in this channel. Sending them to you now...",
            tables.len()
        )
    } else {
        format!(
            "Found {} active table(s) you can access across your servers.",
            tables.len()
        )
    };
    if !respond::reply(ctx, responder, summary, in_guild).await {
        return Ok(());
    }

    for table in &tables {
        let message = CreateInteractionResponseFollowup::new()
            .embed(table_embed(table))
            .components(table_buttons(table))
            .ephemeral(in_guild);
        respond::followup(ctx, responder, message).await;
    }

    tracing::info!(
        "Displayed {} active tables to {} ({})",
        tables.len(),
        command.user.name,
        command.user.id
    );
    Ok(())
}
