//! Select menus opened by `/archive-table` and `/edit-table`.
//!
//! Permissions are checked again on selection, since the menu may have been
//! opened before the user lost their rights.

use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateInteractionResponse,
    EditInteractionResponse,
};

use crate::{
    bot::{
        modal::table_form,
        permission::PermissionResolver,
        respond::{self, Responder, UNSAVED_NOTICE},
        table_message,
        ui::info_preview,
    },
    error::{table::TableError, AppError},
    state::AppState,
};

/// Table id chosen in a string select menu.
fn selected_table_id(component: &ComponentInteraction) -> Option<&str> {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => {
            values.first().map(String::as_str)
        }
        _ => None,
    }
}

/// Archives the selected table and greys out its message.
///
/// The select message is acknowledged first and replaced with the outcome
/// once the table is archived.
pub async fn archive(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(table_id) = selected_table_id(component) else {
        respond::reply_ephemeral(ctx, Responder::Component(component), "No selection detected.")
            .await;
        return Ok(());
    };
    let user_id = component.user.id.get();

    component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await?;

    let table = state.store.get(table_id).await?;
    if !table.is_active() {
        return Err(TableError::Archived(table.id).into());
    }
    let reason = PermissionResolver::new(ctx, user_id)
        .authorize(&table, "archive")
        .await?;

    let committed = state.store.archive(table_id, reason, Some(user_id)).await?;
    let archived = &committed.value;

    tracing::info!(
        "Table {} archived by {} ({})",
        table_id,
        component.user.name,
        component.user.id
    );

    let mut content = format!("Table '{}' has been archived.", info_preview(&archived.info));
    if !committed.is_persisted() {
        content = format!("{}\n{}", content, UNSAVED_NOTICE);
    }
    let edit = EditInteractionResponse::new()
        .content(content)
        .components(Vec::new());
    if let Err(err) = component.edit_response(&ctx.http, edit).await {
        tracing::warn!("Failed to update archive selector: {}", err);
    }

    table_message::refresh(ctx, state, archived).await;
    Ok(())
}

/// Opens the pre-filled form for the selected table.
pub async fn edit(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(table_id) = selected_table_id(component) else {
        respond::reply_ephemeral(ctx, Responder::Component(component), "No selection detected.")
            .await;
        return Ok(());
    };

    let table = state.store.get(table_id).await?;
    if !table.is_active() {
        respond::reply_ephemeral(
            ctx,
            Responder::Component(component),
            "This table can no longer be edited.",
        )
        .await;
        return Ok(());
    }
    PermissionResolver::new(ctx, component.user.id.get())
        .authorize(&table, "edit")
        .await?;

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Modal(table_form::edit_modal(&table)),
        )
        .await?;
    Ok(())
}
