//! Slash command definitions and dispatch.
//!
//! Every command passes the per-user and per-guild rate limiters before it
//! runs. Each submodule exposes its `NAME`, a `register()` builder used on
//! ready, and a `run()` handler.

use serenity::all::{CommandInteraction, Context, CreateCommand};
use std::collections::HashSet;

use crate::{
    bot::permission::PermissionResolver,
    error::AppError,
    model::table::{ListScope, Table},
    state::AppState,
};

pub mod archive_table;
pub mod create_table;
pub mod edit_table;
pub mod list_tables;
pub mod my_tables;
pub mod show_tables;

/// All slash commands, registered globally on ready.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        create_table::register(),
        show_tables::register(),
        list_tables::register(),
        my_tables::register(),
        archive_table::register(),
        edit_table::register(),
    ]
}

/// Rate-limits and runs a slash command.
///
/// # Returns
/// - `Ok(())` - Command handled, including replies for expected outcomes
/// - `Err(AppError)` - Rejected or failed; the caller reports it to the user
pub async fn handle_command(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .limits
        .admit(command.user.id.get(), command.guild_id.map(|g| g.get()))
        .await?;

    match command.data.name.as_str() {
        create_table::NAME => create_table::run(ctx, command).await,
        show_tables::NAME => show_tables::run(state, ctx, command).await,
        list_tables::NAME => list_tables::run(state, ctx, command).await,
        my_tables::NAME => my_tables::run(state, ctx, command).await,
        archive_table::NAME => archive_table::run(state, ctx, command).await,
        edit_table::NAME => edit_table::run(state, ctx, command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(())
        }
    }
}

/// Active tables visible where the command was used.
///
/// In a server channel these are the channel's tables. In a DM they are the
/// tables the user is part of plus those in channels the user can see.
async fn visible_tables(state: &AppState, ctx: &Context, command: &CommandInteraction) -> Vec<Table> {
    let user_id = command.user.id.get();

    let scope = if command.guild_id.is_some() {
        ListScope::Channel(command.channel_id.get())
    } else {
        let mut resolver = PermissionResolver::new(ctx, user_id);
        let mut visible_channel_ids = HashSet::new();
        for channel_id in state.store.active_channel_ids().await {
            if resolver.can_view(channel_id).await {
                visible_channel_ids.insert(channel_id);
            }
        }
        ListScope::Direct {
            user_id,
            visible_channel_ids,
        }
    };

    state.store.list_for(&scope).await
}

/// Active tables the user may archive or edit.
async fn manageable_tables(state: &AppState, ctx: &Context, user_id: u64) -> Vec<Table> {
    let mut resolver = PermissionResolver::new(ctx, user_id);
    let mut tables = Vec::new();

    for table in state.store.active_tables().await {
        if resolver.can_manage(&table).await {
            tables.push(table);
        }
    }
    tables
}
