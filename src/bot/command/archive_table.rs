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
    error::AppError,
    state::AppState,
};

pub const NAME: &str = "archive-table";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Select one of your tables to archive it.")
}

/// Offers a private menu of the tables the user may archive.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let tables = manageable_tables(state, ctx, command.user.id.get()).await;

    if tables.is_empty() {
        respond::reply_ephemeral(
            ctx,
            Responder::Command(command),
            "You have no active tables you can archive.",
        )
        .await;
        return Ok(());
    }

    let message = CreateInteractionResponseMessage::new()
        .content("Please select one of your tables to archive:")
        .components(vec![table_select(
            CustomId::ArchiveSelect,
            "Select a table to archive...",
            &tables,
        )])
        .ephemeral(true);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    tracing::info!(
        "Displayed archive selector for {} tables to {} ({})",
        tables.len(),
        command.user.name,
        command.user.id
    );
    Ok(())
}
