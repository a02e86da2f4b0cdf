//! The table form used to create and edit tables.
//!
//! Both flows share the same four fields. Creating posts the table message
//! first and stores the table with that message id in one step, so a stored
//! table always has a message to point at. Editing updates the store, then
//! re-renders the message.

use serenity::all::{
    ActionRow, ActionRowComponent, Context, CreateActionRow, CreateInputText,
    CreateMessage, CreateModal, InputTextStyle, ModalInteraction,
};

use crate::{
    bot::{
        permission::PermissionResolver,
        respond::{self, is_forbidden, Responder, UNSAVED_NOTICE},
        table_message,
        ui::{
            custom_id::CustomId,
            embed::{table_buttons, table_embed},
            info_preview,
        },
    },
    error::{table::TableError, AppError},
    model::table::{
        parse_max_players, CreateTableParams, Table, TableDraft, UpdateTableParams,
        INFO_MAX_LEN, SCHEDULE_MAX_LEN, SYSTEM_MAX_LEN,
    },
    state::AppState,
};

const SYSTEM_FIELD: &str = "system";
const SCHEDULE_FIELD: &str = "schedule";
const MAX_PLAYERS_FIELD: &str = "max_players";
const INFO_FIELD: &str = "infos";

/// Raw values entered in the table form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableForm {
    pub system: String,
    pub schedule: String,
    pub max_players: String,
    pub info: String,
}

impl TableForm {
    /// Collects the text inputs of a submitted modal. Missing fields stay empty.
    pub fn from_rows(rows: &[ActionRow]) -> Self {
        let mut form = Self::default();

        for component in rows.iter().flat_map(|row| row.components.iter()) {
            let ActionRowComponent::InputText(input) = component else {
                continue;
            };
            let value = input.value.clone().unwrap_or_default();
            match input.custom_id.as_str() {
                SYSTEM_FIELD => form.system = value,
                SCHEDULE_FIELD => form.schedule = value,
                MAX_PLAYERS_FIELD => form.max_players = value,
                INFO_FIELD => form.info = value,
                _ => {}
            }
        }

        form
    }

    /// Converts the form into creation parameters.
    ///
    /// The player cap is checked here; text fields are validated by `TableDraft::new`.
    pub fn into_create_params(
        self,
        gm_id: u64,
        channel_id: u64,
        guild_id: Option<u64>,
    ) -> Result<CreateTableParams, TableError> {
        let max_players = parse_max_players(&self.max_players)?;

        Ok(CreateTableParams {
            system: self.system,
            schedule: self.schedule,
            max_players,
            info: self.info,
            gm_id,
            channel_id,
            guild_id,
        })
    }

    /// Converts the form into an edit that replaces every field.
    pub fn into_update_params(self) -> Result<UpdateTableParams, TableError> {
        let max_players = parse_max_players(&self.max_players)?;

        Ok(UpdateTableParams {
            system: Some(self.system),
            schedule: Some(self.schedule),
            max_players: Some(max_players),
            info: Some(self.info),
        })
    }
}

/// Empty form opened by `/create-table`.
pub fn create_modal() -> CreateModal {
    CreateModal::new(CustomId::CreateModal.to_string(), "Create a New Game Table")
        .components(form_rows(None))
}

/// Form pre-filled with the current values of `table`.
pub fn edit_modal(table: &Table) -> CreateModal {
    CreateModal::new(
        CustomId::EditModal(table.id.clone()).to_string(),
        "Edit Game Table",
    )
    .components(form_rows(Some(table)))
}

fn form_rows(table: Option<&Table>) -> Vec<CreateActionRow> {
    let input = |style, label: &str, id: &str, placeholder: &str, max: usize| {
        CreateInputText::new(style, label, id)
            .placeholder(placeholder)
            .max_length(max as u16)
            .required(true)
    };

    let mut system = input(
        InputTextStyle::Short,
        "System",
        SYSTEM_FIELD,
        "e.g., Warhammer 40k, D&D 5e, Call of Cthulhu, Pathfinder",
        SYSTEM_MAX_LEN,
    );
    let mut schedule = input(
        InputTextStyle::Short,
        "Schedule",
        SCHEDULE_FIELD,
        "e.g., Every Friday at 20:00 CET",
        SCHEDULE_MAX_LEN,
    );
    let mut max_players = input(
        InputTextStyle::Short,
        "Max Number of Players",
        MAX_PLAYERS_FIELD,
        "e.g., 5",
        2,
    );
    let mut info = input(
        InputTextStyle::Paragraph,
        "Infos",
        INFO_FIELD,
        "A short description of the adventure, theme, and tone.",
        INFO_MAX_LEN,
    );

    if let Some(table) = table {
        system = system.value(table.system.clone());
        schedule = schedule.value(table.schedule.clone());
        max_players = max_players.value(table.max_players.to_string());
        info = info.value(table.info.clone());
    }

    [system, schedule, max_players, info]
        .into_iter()
        .map(CreateActionRow::InputText)
        .collect()
}

/// Creates a table from the submitted form.
///
/// # Returns
/// - `Ok(())` - Table created, or the bot couldn't post in the channel (user told)
/// - `Err(AppError)` - Invalid input or a store failure
pub async fn submit_create(
    state: &AppState,
    ctx: &Context,
    submission: &ModalInteraction,
) -> Result<(), AppError> {
    let responder = Responder::Modal(submission);
    let Some(guild_id) = submission.guild_id else {
        respond::reply_ephemeral(
            ctx,
            responder,
            "This command can only be used in a server's text channel.",
        )
        .await;
        return Ok(());
    };

    tracing::info!(
        "Modal for /create-table submitted by {} ({})",
        submission.user.name,
        submission.user.id
    );

    let params = TableForm::from_rows(&submission.data.components).into_create_params(
        submission.user.id.get(),
        submission.channel_id.get(),
        Some(guild_id.get()),
    )?;
    let draft = TableDraft::new(params)?;

    submission.defer_ephemeral(&ctx.http).await?;

    let message = CreateMessage::new()
        .embed(table_embed(draft.table()))
        .components(table_buttons(draft.table()));
    let posted = match submission.channel_id.send_message(&ctx.http, message).await {
        Ok(posted) => posted,
        Err(err) if is_forbidden(&err) => {
            tracing::warn!(
                "Missing permission to send table message in channel {}",
                submission.channel_id
            );
            respond::followup_ephemeral(
                ctx,
                responder,
                "I don't have permission to post in this channel. Please check my permissions.",
            )
            .await;
            return Ok(());
        }
        Err(err) => {
            tracing::error!(
                "Failed to send table message in channel {}: {}",
                submission.channel_id,
                err
            );
            respond::followup_ephemeral(
                ctx,
                responder,
                "I couldn't post the table message due to an error. Please try again later.",
            )
            .await;
            return Ok(());
        }
    };

    tracing::debug!("Posted table {} as message {}", draft.id(), posted.id);

    let committed = match state
        .store
        .create(draft.with_message_id(posted.id.get()))
        .await
    {
        Ok(committed) => committed,
        Err(err) => {
            if let Err(e) = posted.delete(&ctx.http).await {
                tracing::warn!("Failed to remove message of unsaved table: {}", e);
            }
            return Err(err);
        }
    };

    let mut content = format!(
        "Your table '{}' has been created in this channel!",
        info_preview(&committed.value.info)
    );
    if !committed.is_persisted() {
        content = format!("{}\n{}", content, UNSAVED_NOTICE);
    }
    respond::followup_ephemeral(ctx, responder, content).await;

    Ok(())
}

/// Applies the submitted form to an existing table.
///
/// Permission is checked again on submit: the menu may have been opened
/// before the user lost their rights.
pub async fn submit_edit(
    state: &AppState,
    ctx: &Context,
    submission: &ModalInteraction,
    table_id: &str,
) -> Result<(), AppError> {
    let responder = Responder::Modal(submission);
    let user_id = submission.user.id.get();

    tracing::info!(
        "Modal for /edit-table submitted by {} ({}) for {}",
        submission.user.name,
        submission.user.id,
        table_id
    );

    let params = TableForm::from_rows(&submission.data.components).into_update_params()?;

    submission.defer_ephemeral(&ctx.http).await?;

    let table = state.store.get(table_id).await?;
    if !table.is_active() {
        return Err(TableError::Archived(table.id).into());
    }
    PermissionResolver::new(ctx, user_id)
        .authorize(&table, "edit")
        .await?;

    let committed = state.store.edit(table_id, params).await?;
    let (table, promoted) = &committed.value;

    let mut content = "Table has been updated successfully.".to_string();
    if !committed.is_persisted() {
        content = format!("{}\n{}", content, UNSAVED_NOTICE);
    }
    respond::followup_ephemeral(ctx, responder, content).await;

    table_message::refresh(ctx, state, table).await;
    table_message::announce_promotions(ctx, table, promoted).await;

    Ok(())
}
