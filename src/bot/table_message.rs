//! Keeps the message displaying a table in sync with the store.

use serenity::all::{ChannelId, Context, CreateMessage, EditMessage, MessageId};

use crate::{
    bot::{
        respond::{self, is_forbidden, is_not_found},
        ui::{
            embed::{table_buttons, table_embed},
            info_preview,
        },
    },
    model::table::Table,
    state::AppState,
};

/// Re-renders the origin message of `table`.
///
/// An active table whose message was deleted is posted again and the new
/// message id stored. Archived tables are only edited, never re-posted.
/// Failures are logged; the store is already up to date.
pub async fn refresh(ctx: &Context, state: &AppState, table: &Table) {
    let channel_id = ChannelId::new(table.channel_id);

    let Some(message_id) = table.message_id else {
        if table.is_active() {
            repost(ctx, state, table).await;
        }
        return;
    };

    let edit = EditMessage::new()
        .embed(table_embed(table))
        .components(table_buttons(table));

    match channel_id
        .edit_message(&ctx.http, MessageId::new(message_id), edit)
        .await
    {
        Ok(_) => {}
        Err(err) if is_not_found(&err) => {
            tracing::warn!(
                "Message {} for table {} no longer exists",
                message_id,
                table.id
            );
            if table.is_active() {
                repost(ctx, state, table).await;
            }
        }
        Err(err) if is_forbidden(&err) => {
            tracing::warn!(
                "Missing permission to edit message {} for table {} in channel {}",
                message_id,
                table.id,
                channel_id
            );
        }
        Err(err) => {
            tracing::error!(
                "Failed to edit message {} for table {}: {}",
                message_id,
                table.id,
                err
            );
        }
    }
}

async fn repost(ctx: &Context, state: &AppState, table: &Table) {
    let channel_id = ChannelId::new(table.channel_id);
    let message = CreateMessage::new()
        .embed(table_embed(table))
        .components(table_buttons(table));

    let posted = match channel_id.send_message(&ctx.http, message).await {
        Ok(posted) => posted,
        Err(err) => {
            tracing::warn!(
                "Failed to re-post table {} in channel {}: {}",
                table.id,
                channel_id,
                err
            );
            return;
        }
    };

    match state.store.attach_message(&table.id, posted.id.get()).await {
        Ok(committed) if !committed.is_persisted() => {
            tracing::warn!("New message id for table {} is not on disk yet", table.id);
        }
        Ok(_) => tracing::info!("Re-posted table {} as message {}", table.id, posted.id),
        // Archived or removed meanwhile
        Err(err) => tracing::warn!("Could not attach message to table {}: {}", table.id, err),
    }
}

/// Announces promoted users in the table's channel and tells each of them by DM.
pub async fn announce_promotions(ctx: &Context, table: &Table, promoted: &[u64]) {
    let preview = info_preview(&table.info);

    for user_id in promoted {
        respond::announce(
            ctx,
            table.channel_id,
            format!(
                "<@{}> has been moved from the waitlist into the table '{}'.",
                user_id, preview
            ),
            &[*user_id],
        )
        .await;

        respond::direct_message(
            ctx,
            *user_id,
            format!(
                "Good news! A seat opened up and you have been moved from the waitlist into the table '{}'.",
                preview
            ),
        )
        .await;
    }
}
