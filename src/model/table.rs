//! Domain model for tables and the rules that govern sign-ups.
//!
//! `Table` owns the roster invariants: a user holds at most one place across
//! players and waiting list, the player list never exceeds the cap, and the GM
//! never signs up at their own table. The store serializes access; everything
//! here is plain synchronous logic so it can be tested without a runtime.

use chrono::{DateTime, Utc};
use entity::prelude::{ArchiveReason, TableRecord, TableStatus};
use std::collections::HashSet;

use crate::{
    error::{internal::InternalError, table::TableError},
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Largest player cap accepted from the create and edit forms.
pub const MAX_PLAYERS_LIMIT: u32 = 20;
/// Maximum length of the system field in characters.
pub const SYSTEM_MAX_LEN: usize = 100;
/// Maximum length of the schedule field in characters.
pub const SCHEDULE_MAX_LEN: usize = 120;
/// Maximum length of the infos field in characters.
pub const INFO_MAX_LEN: usize = 1024;

/// A posted game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// UUID v4 string, also used in button custom ids.
    pub id: String,
    pub system: String,
    pub schedule: String,
    /// Discord user id of the game master.
    pub gm_id: u64,
    pub max_players: u32,
    pub info: String,
    /// Channel the table was created in.
    pub channel_id: u64,
    /// Guild the table was created in, `None` for tables without a server.
    pub guild_id: Option<u64>,
    pub status: TableStatus,
    /// Confirmed players in sign-up order.
    pub players: Vec<u64>,
    /// Queued users in sign-up order; the head is promoted first.
    pub waiting_list: Vec<u64>,
    /// Message displaying the table, once posted.
    pub message_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub archive_reason: Option<ArchiveReason>,
    pub archived_at: Option<DateTime<Utc>>,
    pub archived_by: Option<u64>,
}

/// Result of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// User took a free seat.
    Joined,
    /// Table was full; user was appended to the waiting list.
    Waitlisted,
}

/// Result of a successful leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// User gave up a seat. `promoted` is the waiting user who took it, if any.
    Left { promoted: Option<u64> },
    /// User was removed from the waiting list.
    LeftWaitlist,
}

/// How a user relates to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRole {
    Gm,
    Player,
    Waiting,
}

impl TableRole {
    /// Label used in the status column of `/my-tables`.
    pub fn label(self) -> &'static str {
        match self {
            TableRole::Gm => "DM",
            TableRole::Player => "Player",
            TableRole::Waiting => "Waiting",
        }
    }
}

/// Which active tables a listing should include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Tables created in this channel.
    Channel(u64),
    /// Tables the user is involved in, plus tables in channels the user can see.
    ///
    /// Visibility is resolved against Discord by the caller.
    Direct {
        user_id: u64,
        visible_channel_ids: HashSet<u64>,
    },
}

/// Parameters for creating a new table.
#[derive(Debug, Clone)]
pub struct CreateTableParams {
    pub system: String,
    pub schedule: String,
    pub max_players: u32,
    pub info: String,
    pub gm_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

/// Parameters for editing a table. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTableParams {
    pub system: Option<String>,
    pub schedule: Option<String>,
    pub max_players: Option<u32>,
    pub info: Option<String>,
}

/// A validated table that has not been inserted into the store yet.
///
/// The id exists before insertion so the message carrying the buttons can be
/// posted first and the table stored with its message id in one step.
#[derive(Debug, Clone)]
pub struct TableDraft {
    table: Table,
}

impl TableDraft {
    /// Validates create parameters and assigns a fresh identifier.
    ///
    /// # Arguments
    /// - `params` - Raw values from the create form
    ///
    /// # Returns
    /// - `Ok(TableDraft)` - Trimmed and validated draft with a UUID v4 id
    /// - `Err(TableError::Validation)` - A field is empty, too long, or the cap is out of range
    pub fn new(params: CreateTableParams) -> Result<Self, TableError> {
        let system = validate_text("System", &params.system, SYSTEM_MAX_LEN)?;
        let schedule = validate_text("Schedule", &params.schedule, SCHEDULE_MAX_LEN)?;
        let info = validate_text("Infos", &params.info, INFO_MAX_LEN)?;
        validate_max_players(params.max_players)?;

        Ok(Self {
            table: Table {
                id: uuid::Uuid::new_v4().to_string(),
                system,
                schedule,
                gm_id: params.gm_id,
                max_players: params.max_players,
                info,
                channel_id: params.channel_id,
                guild_id: params.guild_id,
                status: TableStatus::Active,
                players: Vec::new(),
                waiting_list: Vec::new(),
                message_id: None,
                created_at: Some(Utc::now()),
                archive_reason: None,
                archived_at: None,
                archived_by: None,
            },
        })
    }

    /// Identifier the table will be stored under.
    pub fn id(&self) -> &str {
        &self.table.id
    }

    /// Read-only view of the pending table, used to render it before insertion.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Records the id of the message that displays this table.
    pub fn with_message_id(mut self, message_id: u64) -> Self {
        self.table.message_id = Some(message_id);
        self
    }

    pub(crate) fn into_table(self) -> Table {
        self.table
    }
}

/// Parses the "Max Number of Players" form field.
///
/// # Arguments
/// - `value` - Raw text entered by the user
///
/// # Returns
/// - `Ok(u32)` - Cap within `1..=20`
/// - `Err(TableError::Validation)` - Not a number or out of range
pub fn parse_max_players(value: &str) -> Result<u32, TableError> {
    let parsed = value.trim().parse::<u32>().map_err(|_| max_players_error())?;
    validate_max_players(parsed)?;
    Ok(parsed)
}

fn max_players_error() -> TableError {
    TableError::Validation(format!(
        "The 'Max Number of Players' must be a number between 1 and {}.",
        MAX_PLAYERS_LIMIT
    ))
}

fn validate_max_players(max_players: u32) -> Result<(), TableError> {
    if (1..=MAX_PLAYERS_LIMIT).contains(&max_players) {
        Ok(())
    } else {
        Err(max_players_error())
    }
}

/// Trims a free-text field and checks it is non-empty and within `max_len` characters.
fn validate_text(label: &str, value: &str, max_len: usize) -> Result<String, TableError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TableError::Validation(format!("{} cannot be empty.", label)));
    }
    if trimmed.chars().count() > max_len {
        let verb = if label == "Infos" { "are" } else { "is" };
        return Err(TableError::Validation(format!(
            "{} {} too long (max {} characters).",
            label, verb, max_len
        )));
    }
    Ok(trimmed.to_string())
}

impl Table {
    pub fn is_active(&self) -> bool {
        self.status == TableStatus::Active
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players as usize
    }

    /// Role of `user_id` at this table, if any.
    pub fn role_of(&self, user_id: u64) -> Option<TableRole> {
        if self.gm_id == user_id {
            Some(TableRole::Gm)
        } else if self.players.contains(&user_id) {
            Some(TableRole::Player)
        } else if self.waiting_list.contains(&user_id) {
            Some(TableRole::Waiting)
        } else {
            None
        }
    }

    /// Seat summary such as `3/5` or `5/5 (+2)`.
    pub fn seats_label(&self) -> String {
        let mut label = format!("{}/{}", self.players.len(), self.max_players);
        if !self.waiting_list.is_empty() {
            label.push_str(&format!(" (+{})", self.waiting_list.len()));
        }
        label
    }

    fn ensure_active(&self) -> Result<(), TableError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TableError::Archived(self.id.clone()))
        }
    }

    /// Adds a user to the players, or to the waiting list when the table is full.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user signing up
    ///
    /// # Returns
    /// - `Ok(JoinOutcome::Joined)` - User took a seat
    /// - `Ok(JoinOutcome::Waitlisted)` - Table was full, user queued
    /// - `Err(TableError::Archived)` - Table no longer accepts sign-ups
    /// - `Err(TableError::OwnTable)` - User is the GM
    /// - `Err(TableError::AlreadyJoined)` / `Err(TableError::AlreadyWaiting)` - User already present
    pub fn join(&mut self, user_id: u64) -> Result<JoinOutcome, TableError> {
        self.ensure_active()?;

        match self.role_of(user_id) {
            Some(TableRole::Gm) => return Err(TableError::OwnTable),
            Some(TableRole::Player) => return Err(TableError::AlreadyJoined),
            Some(TableRole::Waiting) => return Err(TableError::AlreadyWaiting),
            None => {}
        }

        if self.is_full() {
            self.waiting_list.push(user_id);
            Ok(JoinOutcome::Waitlisted)
        } else {
            self.players.push(user_id);
            Ok(JoinOutcome::Joined)
        }
    }

    /// Removes a user and promotes the head of the waiting list into a freed seat.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user leaving
    ///
    /// # Returns
    /// - `Ok(LeaveOutcome::Left)` - User left the players, with the promoted user if any
    /// - `Ok(LeaveOutcome::LeftWaitlist)` - User left the waiting list
    /// - `Err(TableError::Archived)` - Table is archived
    /// - `Err(TableError::NotMember)` - User was in neither list
    pub fn leave(&mut self, user_id: u64) -> Result<LeaveOutcome, TableError> {
        self.ensure_active()?;

        if let Some(index) = self.players.iter().position(|id| *id == user_id) {
            self.players.remove(index);
            let promoted = self.promote_waiting();
            return Ok(LeaveOutcome::Left { promoted });
        }

        if let Some(index) = self.waiting_list.iter().position(|id| *id == user_id) {
            self.waiting_list.remove(index);
            return Ok(LeaveOutcome::LeftWaitlist);
        }

        Err(TableError::NotMember)
    }

    /// Moves the first waiting user into the players if a seat is free.
    fn promote_waiting(&mut self) -> Option<u64> {
        if self.is_full() || self.waiting_list.is_empty() {
            return None;
        }
        let promoted = self.waiting_list.remove(0);
        self.players.push(promoted);
        Some(promoted)
    }

    /// Applies an edit after validating every changed field.
    ///
    /// Lowering the cap below the current number of players is rejected rather
    /// than dropping anyone from the roster. Raising it promotes waiting users
    /// into the new seats in order.
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)` - Users promoted from the waiting list by a raised cap
    /// - `Err(TableError::Archived)` - Table is archived
    /// - `Err(TableError::Validation)` - A field is invalid; the table is unchanged
    pub fn apply(&mut self, params: UpdateTableParams) -> Result<Vec<u64>, TableError> {
        self.ensure_active()?;

        let system = params
            .system
            .map(|v| validate_text("System", &v, SYSTEM_MAX_LEN))
            .transpose()?;
        let schedule = params
            .schedule
            .map(|v| validate_text("Schedule", &v, SCHEDULE_MAX_LEN))
            .transpose()?;
        let info = params
            .info
            .map(|v| validate_text("Infos", &v, INFO_MAX_LEN))
            .transpose()?;
        if let Some(max_players) = params.max_players {
            validate_max_players(max_players)?;
            if (max_players as usize) < self.players.len() {
                return Err(TableError::Validation(format!(
                    "This table already has {} players. Ask players to leave before lowering the limit to {}.",
                    self.players.len(),
                    max_players
                )));
            }
        }

        if let Some(system) = system {
            self.system = system;
        }
        if let Some(schedule) = schedule {
            self.schedule = schedule;
        }
        if let Some(info) = info {
            self.info = info;
        }
        if let Some(max_players) = params.max_players {
            self.max_players = max_players;
        }

        let mut promoted = Vec::new();
        while let Some(user_id) = self.promote_waiting() {
            promoted.push(user_id);
        }
        Ok(promoted)
    }

    /// Marks the table archived. Only the store calls this, after moving it between collections.
    pub(crate) fn mark_archived(&mut self, reason: ArchiveReason, archived_by: Option<u64>) {
        self.status = TableStatus::Archived;
        self.archive_reason = Some(reason);
        self.archived_at = Some(Utc::now());
        self.archived_by = archived_by;
    }

    /// Converts a persisted record to a domain table at the repository boundary.
    ///
    /// # Arguments
    /// - `id` - Key of the record in its document
    /// - `record` - The stored record
    ///
    /// # Returns
    /// - `Ok(Table)` - Converted table
    /// - `Err(InternalError::ParseStringId)` - A stored snowflake is not a valid `u64`
    /// - `Err(InternalError::InconsistentTable)` - The roster breaks a table invariant
    pub fn from_entity(id: String, record: TableRecord) -> Result<Self, InternalError> {
        let parse_list = |ids: Vec<String>| -> Result<Vec<u64>, InternalError> {
            ids.iter().map(|id| parse_u64_from_string(id)).collect()
        };

        let table = Self {
            id,
            system: record.system,
            schedule: record.schedule,
            gm_id: parse_u64_from_string(&record.gm_id)?,
            max_players: record.max_players,
            info: record.info,
            channel_id: parse_u64_from_string(&record.channel_id)?,
            guild_id: parse_optional_u64(record.guild_id.as_deref())?,
            status: record.status,
            players: parse_list(record.players)?,
            waiting_list: parse_list(record.waiting_list)?,
            message_id: parse_optional_u64(record.message_id.as_deref())?,
            created_at: record.created_at,
            archive_reason: record.archive_reason,
            archived_at: record.archived_at,
            archived_by: parse_optional_u64(record.archived_by.as_deref())?,
        };
        table.check_roster()?;
        Ok(table)
    }

    /// Verifies the roster invariants a hand-edited document could break.
    fn check_roster(&self) -> Result<(), InternalError> {
        let inconsistent = |reason: String| Err(InternalError::InconsistentTable(reason));

        if self.max_players < 1 {
            return inconsistent("max_players must be at least 1".to_string());
        }
        if self.players.len() > self.max_players as usize {
            return inconsistent(format!(
                "{} players exceed the cap of {}",
                self.players.len(),
                self.max_players
            ));
        }

        let mut seen = HashSet::new();
        for user_id in self.players.iter().chain(&self.waiting_list) {
            if *user_id == self.gm_id {
                return inconsistent(format!("GM {} is listed on their own table", user_id));
            }
            if !seen.insert(*user_id) {
                return inconsistent(format!("user {} is listed more than once", user_id));
            }
        }
        Ok(())
    }

    /// Converts the table into its persisted record. Ids are written as strings.
    pub fn to_entity(&self) -> TableRecord {
        TableRecord {
            system: self.system.clone(),
            schedule: self.schedule.clone(),
            gm_id: self.gm_id.to_string(),
            max_players: self.max_players,
            info: self.info.clone(),
            channel_id: self.channel_id.to_string(),
            guild_id: self.guild_id.map(|id| id.to_string()),
            status: self.status,
            players: self.players.iter().map(u64::to_string).collect(),
            waiting_list: self.waiting_list.iter().map(u64::to_string).collect(),
            message_id: self.message_id.map(|id| id.to_string()),
            created_at: self.created_at,
            archive_reason: self.archive_reason,
            archived_at: self.archived_at,
            archived_by: self.archived_by.map(|id| id.to_string()),
        }
    }
}
