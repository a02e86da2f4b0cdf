//! Permission and display-name lookups against Discord.
//!
//! Both resolvers memoise their lookups, so a command that walks many tables
//! fetches each channel and member at most once.

use entity::prelude::ArchiveReason;
use serenity::all::{ChannelId, Context, GuildChannel, GuildId, Member, Permissions, UserId};
use std::collections::HashMap;

use crate::{error::access::AccessError, model::table::Table};

/// Resolves one user's permissions in table channels.
pub struct PermissionResolver<'a> {
    ctx: &'a Context,
    user_id: UserId,
    channels: HashMap<ChannelId, Option<GuildChannel>>,
    members: HashMap<GuildId, Option<Member>>,
}

impl<'a> PermissionResolver<'a> {
    pub fn new(ctx: &'a Context, user_id: u64) -> Self {
        Self {
            ctx,
            user_id: UserId::new(user_id),
            channels: HashMap::new(),
            members: HashMap::new(),
        }
    }

    /// Computes the user's effective permissions in a guild channel.
    ///
    /// # Returns
    /// - `Some(Permissions)` - Permissions after role and channel overwrites
    /// - `None` - Channel unknown or not in a guild, user not a member, or guild not cached
    pub async fn permissions_in(&mut self, channel_id: u64) -> Option<Permissions> {
        let channel = self.channel(ChannelId::new(channel_id)).await?;
        let member = self.member(channel.guild_id).await?;

        let guild = self.ctx.cache.guild(channel.guild_id)?;
        Some(guild.user_permissions_in(&channel, &member))
    }

    /// Whether the user may archive or edit `table`: its GM, or anyone who can
    /// manage messages in its channel.
    pub async fn can_manage(&mut self, table: &Table) -> bool {
        table.gm_id == self.user_id.get() || self.is_moderator(table).await
    }

    /// Checks that the user may `action` the table.
    ///
    /// # Arguments
    /// - `table` - Table being archived or edited
    /// - `action` - Verb used in the rejection message, e.g. `"archive"`
    ///
    /// # Returns
    /// - `Ok(ArchiveReason::Owner)` - The user is the table's GM
    /// - `Ok(ArchiveReason::Mod)` - The user can manage messages in the table's channel
    /// - `Err(AccessError::PermissionDenied)` - Neither
    pub async fn authorize(
        &mut self,
        table: &Table,
        action: &str,
    ) -> Result<ArchiveReason, AccessError> {
        if table.gm_id == self.user_id.get() {
            return Ok(ArchiveReason::Owner);
        }
        if self.is_moderator(table).await {
            return Ok(ArchiveReason::Mod);
        }

        tracing::warn!(
            "User {} lacks permission to {} table {}",
            self.user_id,
            action,
            table.id
        );
        Err(AccessError::PermissionDenied(format!(
            "You are not allowed to {} this table.",
            action
        )))
    }

    async fn is_moderator(&mut self, table: &Table) -> bool {
        self.permissions_in(table.channel_id)
            .await
            .is_some_and(|permissions| permissions.manage_messages())
    }

    /// Whether the user can see the channel.
    pub async fn can_view(&mut self, channel_id: u64) -> bool {
        self.permissions_in(channel_id)
            .await
            .is_some_and(|permissions| permissions.view_channel())
    }

    async fn channel(&mut self, channel_id: ChannelId) -> Option<GuildChannel> {
        if let Some(cached) = self.channels.get(&channel_id) {
            return cached.clone();
        }

        let channel = match channel_id.to_channel(self.ctx).await {
            Ok(channel) => channel.guild(),
            Err(err) => {
                tracing::debug!("Failed to fetch channel {}: {}", channel_id, err);
                None
            }
        };
        self.channels.insert(channel_id, channel.clone());
        channel
    }

    async fn member(&mut self, guild_id: GuildId) -> Option<Member> {
        if let Some(cached) = self.members.get(&guild_id) {
            return cached.clone();
        }

        let member = match guild_id.member(self.ctx, self.user_id).await {
            Ok(member) => Some(member),
            Err(err) => {
                tracing::debug!(
                    "Failed to fetch member {} of guild {}: {}",
                    self.user_id,
                    guild_id,
                    err
                );
                None
            }
        };
        self.members.insert(guild_id, member.clone());
        member
    }
}

/// Resolves display names for the GM column of listings.
pub struct NameResolver<'a> {
    ctx: &'a Context,
    names: HashMap<(u64, Option<u64>), String>,
}

impl<'a> NameResolver<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            names: HashMap::new(),
        }
    }

    /// Name of `user_id` as shown in `guild_id`.
    ///
    /// Prefers the server nickname, then the global display name, then the raw id.
    pub async fn display_name(&mut self, user_id: u64, guild_id: Option<u64>) -> String {
        if let Some(name) = self.names.get(&(user_id, guild_id)) {
            return name.clone();
        }

        let name = self.lookup(UserId::new(user_id), guild_id.map(GuildId::new)).await;
        self.names.insert((user_id, guild_id), name.clone());
        name
    }

    async fn lookup(&self, user_id: UserId, guild_id: Option<GuildId>) -> String {
        if let Some(guild_id) = guild_id {
            if let Ok(member) = guild_id.member(self.ctx, user_id).await {
                return member.display_name().to_string();
            }
        }

        match user_id.to_user(self.ctx).await {
            Ok(user) => user.display_name().to_string(),
            Err(err) => {
                tracing::debug!("Failed to resolve user {}: {}", user_id, err);
                user_id.to_string()
            }
        }
    }
}
