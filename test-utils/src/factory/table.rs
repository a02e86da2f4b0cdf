//! Table record factory for seeding table documents.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::prelude::{ArchiveReason, TableRecord, TableStatus};

/// Factory for creating test table records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::table::TableRecordFactory;
///
/// let (id, record) = TableRecordFactory::new()
///     .system("Blades in the Dark")
///     .channel_id("200")
///     .build();
/// ```
pub struct TableRecordFactory {
    id: String,
    record: TableRecord,
}

impl TableRecordFactory {
    /// Creates a new TableRecordFactory with default values.
    ///
    /// Defaults:
    /// - id: `"00000000-0000-4000-8000-{n:012}"` where n is auto-incremented
    /// - system: `"System {n}"`
    /// - gm_id: `"9000"`, channel_id: `"500"`, guild_id: `Some("700")`
    /// - max_players: `4`, status: active, no players
    ///
    /// # Returns
    /// - `TableRecordFactory` - New factory instance with defaults
    pub fn new() -> Self {
        let n = next_id();
        Self {
            id: format!("00000000-0000-4000-8000-{:012}", n),
            record: TableRecord {
                system: format!("System {}", n),
                schedule: "Friday 20:00".to_string(),
                gm_id: "9000".to_string(),
                max_players: 4,
                info: "Test table description".to_string(),
                channel_id: "500".to_string(),
                guild_id: Some("700".to_string()),
                status: TableStatus::Active,
                players: Vec::new(),
                waiting_list: Vec::new(),
                message_id: None,
                created_at: Some(Utc::now()),
                archive_reason: None,
                archived_at: None,
                archived_by: None,
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.record.system = system.into();
        self
    }

    pub fn schedule(mut self, schedule: impl Into<String>) -> Self {
        self.record.schedule = schedule.into();
        self
    }

    pub fn gm_id(mut self, gm_id: impl Into<String>) -> Self {
        self.record.gm_id = gm_id.into();
        self
    }

    pub fn max_players(mut self, max_players: u32) -> Self {
        self.record.max_players = max_players;
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.record.channel_id = channel_id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: Option<&str>) -> Self {
        self.record.guild_id = guild_id.map(str::to_string);
        self
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.record.message_id = Some(message_id.into());
        self
    }

    /// Sets the confirmed players in order.
    pub fn players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.players = players.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the waiting list in order.
    pub fn waiting_list<I, S>(mut self, waiting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.waiting_list = waiting.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the record archived with the given reason.
    pub fn archived(mut self, reason: ArchiveReason) -> Self {
        self.record.status = TableStatus::Archived;
        self.record.archive_reason = Some(reason);
        self.record.archived_at = Some(Utc::now());
        self
    }

    /// Builds the record.
    ///
    /// # Returns
    /// - `(String, TableRecord)` - Document key and record
    pub fn build(self) -> (String, TableRecord) {
        (self.id, self.record)
    }
}

impl Default for TableRecordFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an active table record with default values.
///
/// Shorthand for `TableRecordFactory::new().build()`.
pub fn create_table_record() -> (String, TableRecord) {
    TableRecordFactory::new().build()
}
