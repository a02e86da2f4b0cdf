use thiserror::Error;

/// Domain rule violations raised by table operations.
///
/// Every variant carries a message that is safe to show to the invoking user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// User input failed validation (empty field, bad player cap, ...).
    #[error("{0}")]
    Validation(String),

    /// No table exists with this id, active or archived.
    #[error("This table no longer exists.")]
    NotFound(String),

    /// The user already holds a seat.
    #[error("You are already signed up!")]
    AlreadyJoined,

    /// The user is already queued on the waiting list.
    #[error("You are already on the waitlist!")]
    AlreadyWaiting,

    /// The user tried to leave a table they are not part of.
    #[error("You weren't signed up in the first place.")]
    NotMember,

    /// The table has been archived and no longer accepts changes.
    #[error("This table has been archived.")]
    Archived(String),

    /// The GM tried to take a seat at their own table.
    #[error("You are the GM of this table and can't sign up as a player.")]
    OwnTable,
}
