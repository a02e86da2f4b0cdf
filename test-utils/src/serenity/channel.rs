//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::{ChannelType, GuildChannel};

/// Creates a test Serenity GuildChannel.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Guild the channel belongs to
/// - `name` - Channel name
/// - `kind` - Channel type, e.g. `ChannelType::Text` or `ChannelType::Voice`
///
/// # Returns
/// - `GuildChannel` - A valid Serenity GuildChannel struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use serenity::all::ChannelType;
/// use test_utils::serenity::channel::create_test_channel;
///
/// let channel = create_test_channel(500, 700, "tables", ChannelType::Text);
/// assert_eq!(channel.guild_id.get(), 700);
/// ```
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: ChannelType,
) -> GuildChannel {
    let kind: u8 = kind.into();
    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "type": kind,
        "guild_id": guild_id.to_string(),
        "name": name,
        "position": 0,
        "permission_overwrites": [],
        "nsfw": false,
        "topic": null,
        "last_message_id": null,
        "parent_id": null,
        "rate_limit_per_user": 0,
        "flags": 0,
        "available_tags": [],
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
