use serenity::all::{CommandInteraction, Context, CreateCommand, CreateInteractionResponse};

use crate::{
    bot::modal::table_form,
    error::{access::AccessError, AppError},
};

pub const NAME: &str = "create-table";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Opens a form to create a new game table.")
}

/// Opens the table form. Server channels only; the table is created when the
/// form is submitted.
pub async fn run(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    if command.guild_id.is_none() {
        return Err(AccessError::GuildOnly.into());
    }

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Modal(table_form::create_modal()),
        )
        .await?;

    Ok(())
}
