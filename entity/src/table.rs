use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A whole persisted document, keyed by table id.
///
/// `BTreeMap` keeps the key order stable between saves so diffs of the data
/// directory stay small.
pub type TablesDocument = BTreeMap<String, TableRecord>;

/// Lifecycle state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Active,
    Archived,
}

/// Why a table was moved to the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchiveReason {
    /// A moderator with Manage Messages archived someone else's table.
    Mod,
    /// The GM archived their own table.
    Owner,
    /// The origin channel was unreachable when the bot restarted.
    NoAccess,
    /// The bot was removed from the guild or the channel was deleted.
    Kick,
}

/// One table as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub system: String,
    pub schedule: String,
    pub gm_id: String,
    pub max_players: u32,
    pub info: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    pub status: TableStatus,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub waiting_list: Vec<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archive_reason: Option<ArchiveReason>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_by: Option<String>,
}
