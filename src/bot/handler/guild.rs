//! Guild removal handler.
//!
//! Discord sends `guild_delete` both when the bot is removed from a guild and
//! when a guild becomes unavailable during an outage. Only the first case
//! archives the guild's tables; an outage is temporary and the tables come
//! back with the guild.

use entity::prelude::ArchiveReason;
use serenity::all::{Context, Guild, UnavailableGuild};

use crate::state::AppState;

/// Handles the guild_delete event.
///
/// Archives every active table of the guild with reason `KICK` unless the
/// event only reports an outage.
///
/// # Arguments
/// - `state` - Shared state holding the table store
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `incomplete` - Guild id and whether it merely became unavailable
/// - `full` - Cached guild data, if any, used for logging
pub async fn handle_guild_delete(
    state: &AppState,
    _ctx: Context,
    incomplete: UnavailableGuild,
    full: Option<Guild>,
) {
    let guild_id = incomplete.id.get();
    let name = full.map(|g| g.name).unwrap_or_else(|| "unknown".to_string());

    if incomplete.unavailable {
        tracing::info!("Guild {} ({}) became unavailable, keeping its tables", name, guild_id);
        return;
    }

    tracing::info!("Removed from guild {} ({})", name, guild_id);

    match state
        .store
        .archive_where(move |t| t.guild_id == Some(guild_id), ArchiveReason::Kick)
        .await
    {
        Ok(committed) if committed.value.is_empty() => {
            tracing::info!("No tables required cleanup for guild {}", guild_id);
        }
        Ok(committed) => {
            tracing::info!(
                "Archived {} table(s) after leaving guild {}",
                committed.value.len(),
                guild_id
            );
        }
        Err(e) => tracing::error!("Failed to archive tables of guild {}: {:?}", guild_id, e),
    }
}
