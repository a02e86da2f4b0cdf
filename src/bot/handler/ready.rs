//! Ready event handler for bot initialization.
//!
//! The ready event fires after the bot connects to Discord's gateway. It is
//! used to:
//! - Register the slash commands globally
//! - Archive tables whose channel the bot can no longer reach
//!
//! Buttons need no re-registration: component ids carry the table id and are
//! routed by prefix, so messages posted before a restart keep working.

use entity::prelude::ArchiveReason;
use serenity::all::{Channel, ChannelId, ChannelType, Command, Context, GuildChannel, Ready};
use std::collections::{HashMap, HashSet};

use crate::{
    bot::{command, respond::http_status},
    model::table::Table,
    state::AppState,
};

/// What a startup lookup found for a table's channel.
#[derive(Debug, Clone)]
pub enum ChannelLookup {
    Guild(GuildChannel),
    /// The id resolves to a DM or group channel.
    Private,
    /// Discord reports the channel missing or inaccessible.
    Gone,
    /// The lookup failed for another reason, such as a network error.
    Failed,
}

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared state holding the table store
/// - `ctx` - Discord context for registering commands and fetching channels
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    match Command::set_global_commands(&ctx.http, command::definitions()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }

    reconcile_tables(state, &ctx).await;
}

/// Archives active tables whose channel is unreachable with reason `NO_ACCESS`.
async fn reconcile_tables(state: &AppState, ctx: &Context) {
    let tables = state.store.active_tables().await;
    let mut lookups: HashMap<u64, ChannelLookup> = HashMap::new();
    let mut unreachable: HashSet<String> = HashSet::new();

    for table in &tables {
        if !lookups.contains_key(&table.channel_id) {
            let lookup = lookup_channel(ctx, table.channel_id).await;
            lookups.insert(table.channel_id, lookup);
        }

        if let Some(lookup) = lookups.get(&table.channel_id) {
            if is_unreachable(table, lookup) {
                unreachable.insert(table.id.clone());
            }
        }
    }

    let restored = tables.len() - unreachable.len();

    if !unreachable.is_empty() {
        let ids: Vec<String> = unreachable.iter().cloned().collect();
        match state
            .store
            .archive_where(move |t| unreachable.contains(&t.id), ArchiveReason::NoAccess)
            .await
        {
            Ok(committed) => tracing::warn!(
                "Archived {} table(s) referencing inaccessible guilds/channels: {}",
                committed.value.len(),
                ids.join(", ")
            ),
            Err(e) => tracing::error!("Failed to archive unreachable tables: {:?}", e),
        }
    }

    tracing::info!("{} active tables restored", restored);
}

async fn lookup_channel(ctx: &Context, channel_id: u64) -> ChannelLookup {
    match ChannelId::new(channel_id).to_channel(ctx).await {
        Ok(Channel::Guild(channel)) => ChannelLookup::Guild(channel),
        Ok(_) => ChannelLookup::Private,
        Err(err) if matches!(http_status(&err), Some(403 | 404)) => ChannelLookup::Gone,
        Err(err) => {
            tracing::warn!("Could not check channel {}: {}", channel_id, err);
            ChannelLookup::Failed
        }
    }
}

/// Decides whether `table` has lost its channel.
///
/// A table stays active only when its channel is a text channel of the guild
/// the table was created in. Tables are left alone when the lookup itself
/// failed, so a network hiccup at startup doesn't archive anything.
pub fn is_unreachable(table: &Table, lookup: &ChannelLookup) -> bool {
    match lookup {
        ChannelLookup::Guild(channel) => {
            !matches!(channel.kind, ChannelType::Text | ChannelType::News)
                || table.guild_id != Some(channel.guild_id.get())
        }
        ChannelLookup::Private | ChannelLookup::Gone => true,
        ChannelLookup::Failed => false,
    }
}
