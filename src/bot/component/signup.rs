//! Sign Up and Leave buttons.
//!
//! The clicked message is updated in place. When it isn't the table's origin
//! message (for example an ephemeral copy from `/show-tables`), the origin
//! message is edited as well.

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::{
    bot::{
        respond::{self, Responder, UNSAVED_NOTICE},
        table_message,
        ui::{
            embed::{table_buttons, table_embed},
            info_preview,
        },
    },
    error::AppError,
    model::table::{JoinOutcome, LeaveOutcome, Table},
    state::AppState,
};

/// Handles a click on "Sign Up" / "Join Waitlist".
///
/// # Returns
/// - `Ok(())` - User seated or queued
/// - `Err(AppError)` - Unknown or archived table, or the user is already signed up
pub async fn join(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    table_id: &str,
) -> Result<(), AppError> {
    let responder = Responder::Component(component);
    let user_id = component.user.id.get();

    let committed = state.store.join(table_id, user_id).await?;
    let (outcome, table) = &committed.value;

    sync_messages(ctx, state, component, table).await;

    let preview = info_preview(&table.info);
    match outcome {
        JoinOutcome::Waitlisted => {
            respond::followup_ephemeral(
                ctx,
                responder,
                "The group is full, but you have been added to the waitlist.",
            )
            .await;
            respond::direct_message(
                ctx,
                user_id,
                format!(
                    "You joined the table '{}', but all seats were taken. You are now on the waitlist.",
                    preview
                ),
            )
            .await;
        }
        JoinOutcome::Joined => {
            respond::direct_message(
                ctx,
                user_id,
                format!(
                    "You successfully joined the table '{}'. See you at the game!",
                    preview
                ),
            )
            .await;
        }
    }

    if !committed.is_persisted() {
        respond::followup_ephemeral(ctx, responder, UNSAVED_NOTICE).await;
    }
    Ok(())
}

/// Handles a click on "Leave".
///
/// A freed seat goes to the first waiting user, who is announced in the
/// table's channel and told by DM.
pub async fn leave(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    table_id: &str,
) -> Result<(), AppError> {
    let responder = Responder::Component(component);
    let user_id = component.user.id.get();

    let committed = state.store.leave(table_id, user_id).await?;
    let (outcome, table) = &committed.value;

    sync_messages(ctx, state, component, table).await;

    let preview = info_preview(&table.info);
    match outcome {
        LeaveOutcome::Left { promoted } => {
            if let Some(promoted) = promoted {
                table_message::announce_promotions(ctx, table, &[*promoted]).await;
            }
            respond::followup_ephemeral(ctx, responder, "You have left the table.").await;
            respond::direct_message(ctx, user_id, format!("You left the table '{}'.", preview))
                .await;
        }
        LeaveOutcome::LeftWaitlist => {
            respond::followup_ephemeral(ctx, responder, "You have been removed from the waitlist.")
                .await;
            respond::direct_message(
                ctx,
                user_id,
                format!("You have been removed from the waitlist for '{}'.", preview),
            )
            .await;
        }
    }

    if !committed.is_persisted() {
        respond::followup_ephemeral(ctx, responder, UNSAVED_NOTICE).await;
    }
    Ok(())
}

/// Updates the clicked message and, when it is a copy, the origin message.
async fn sync_messages(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
    table: &Table,
) {
    let update = CreateInteractionResponseMessage::new()
        .embed(table_embed(table))
        .components(table_buttons(table));

    let clicked_updated = match component
        .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(update))
        .await
    {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                "Failed to update clicked message for table {}: {}",
                table.id,
                err
            );
            false
        }
    };

    let clicked_is_origin = table.message_id == Some(component.message.id.get());
    if !clicked_updated || !clicked_is_origin {
        table_message::refresh(ctx, state, table).await;
    }
}
