//! Channel deletion handler.
//!
//! Tables are bound to the channel they were created in. Once that channel is
//! gone their messages are gone with it, so the tables are archived with
//! reason `KICK`.

use entity::prelude::ArchiveReason;
use serenity::all::{Context, GuildChannel, Message};

use crate::state::AppState;

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// # Arguments
/// - `state` - Shared state holding the table store
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted channel
/// - `_messages` - Cached messages of the channel (unused)
pub async fn handle_channel_delete(
    state: &AppState,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let channel_id = channel.id.get();

    match state
        .store
        .archive_where(move |t| t.channel_id == channel_id, ArchiveReason::Kick)
        .await
    {
        Ok(committed) if committed.value.is_empty() => {
            tracing::debug!(
                "No tables tied to deleted channel {} ({})",
                channel.name,
                channel_id
            );
        }
        Ok(committed) => {
            tracing::info!(
                "Archived {} table(s) for deleted channel {} ({}) in guild {}",
                committed.value.len(),
                channel.name,
                channel_id,
                channel.guild_id
            );
        }
        Err(e) => tracing::error!(
            "Failed to archive tables of deleted channel {}: {:?}",
            channel_id,
            e
        ),
    }
}
