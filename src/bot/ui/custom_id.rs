//! Custom ids carried by buttons, select menus and modals.
//!
//! Button and modal ids embed the table id, so components on messages posted
//! before a restart still route to the right table.

use std::fmt;

const JOIN_PREFIX: &str = "join_";
const LEAVE_PREFIX: &str = "leave_";
const EDIT_MODAL_PREFIX: &str = "edit_table_";
const CREATE_MODAL: &str = "create_table";
const ARCHIVE_SELECT: &str = "archive_select";
const EDIT_SELECT: &str = "edit_select";

/// A parsed component or modal custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomId {
    /// "Sign Up" / "Join Waitlist" button of a table.
    Join(String),
    /// "Leave" button of a table.
    Leave(String),
    /// Select menu listing tables to archive.
    ArchiveSelect,
    /// Select menu listing tables to edit.
    EditSelect,
    /// Form submitted by `/create-table`.
    CreateModal,
    /// Pre-filled form editing a table.
    EditModal(String),
}

impl CustomId {
    /// Parses a raw custom id.
    ///
    /// # Returns
    /// - `Some(CustomId)` - A recognised id; table ids are never empty
    /// - `None` - Unknown id, or a known prefix without a table id
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            CREATE_MODAL => return Some(Self::CreateModal),
            ARCHIVE_SELECT => return Some(Self::ArchiveSelect),
            EDIT_SELECT => return Some(Self::EditSelect),
            _ => {}
        }

        let table_id = |prefix: &str| {
            raw.strip_prefix(prefix)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        };

        if let Some(id) = table_id(JOIN_PREFIX) {
            Some(Self::Join(id))
        } else if let Some(id) = table_id(LEAVE_PREFIX) {
            Some(Self::Leave(id))
        } else {
            table_id(EDIT_MODAL_PREFIX).map(Self::EditModal)
        }
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Join(id) => write!(f, "{}{}", JOIN_PREFIX, id),
            Self::Leave(id) => write!(f, "{}{}", LEAVE_PREFIX, id),
            Self::ArchiveSelect => f.write_str(ARCHIVE_SELECT),
            Self::EditSelect => f.write_str(EDIT_SELECT),
            Self::CreateModal => f.write_str(CREATE_MODAL),
            Self::EditModal(id) => write!(f, "{}{}", EDIT_MODAL_PREFIX, id),
        }
    }
}
