use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};

use crate::{
    bot::{
        command::manageable_tables,
        respond::{self, Responder},
        ui::{custom_id::CustomId, select::table_select},
    },
    error::{access::AccessError, AppError},
    state::AppState,
};

pub const NAME: &str = "edit-table";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Select one of your tables to edit it.")
}

/// Offers a private menu of the tables the user may edit. Server channels only.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    if command.guild_id.is_none() {
        return Err(AccessError::GuildOnly.into());
    }

    let tables = manageable_tables(state, ctx, command.user.id.get()).await;

    if tables.is_empty() {
        respond::reply_ephemeral(
            ctx,
            Responder::Command(command),
            "You have no active tables you can edit.",
        )
        .await;
        return Ok(());
    }

    let message = CreateInteractionResponseMessage::new()
        .content("Please select one of your tables to edit:")
        .components(vec![table_select(
            CustomId::EditSelect,
            "Select a table to edit...",
            &tables,
        )])
        .ephemeral(true);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    tracing::info!(
        "Displayed edit selector for {} tables to {} ({})",
        tables.len(),
        command.user.name,
        command.user.id
    );
    Ok(())
}
