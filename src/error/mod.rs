//! Error types and user-facing message mapping.
//!
//! This module provides the application's error hierarchy. `AppError` is the
//! top-level type that wraps domain-specific errors; handlers catch it at the
//! interaction boundary and turn it into a private reply with
//! [`AppError::user_message`]. Infrastructure failures are logged with full
//! detail but only a generic message is shown to the user.

pub mod access;
pub mod config;
pub mod internal;
pub mod persistence;
pub mod table;

use thiserror::Error;

use crate::error::{
    access::AccessError, config::ConfigError, internal::InternalError,
    persistence::PersistenceError, table::TableError,
};

/// Generic reply for failures the user can't act on.
const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most
/// variants use `#[from]` for automatic conversion so handlers can use `?`
/// freely and map the result once at the boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always fatal as configuration issues prevent normal operation.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Domain rule violation from a table operation.
    ///
    /// The error text is written for the user and shown verbatim.
    #[error(transparent)]
    TableErr(#[from] TableError),

    /// Permission or rate-limit rejection.
    ///
    /// Shown verbatim, with a retry hint for rate limits.
    #[error(transparent)]
    AccessErr(#[from] AccessError),

    /// Failure reading or writing the table documents.
    ///
    /// Corrupt documents are fatal at startup. Write failures after a mutation
    /// are reported through `Committed::flush` instead of this variant.
    #[error(transparent)]
    PersistenceErr(#[from] PersistenceError),

    /// Unexpected internal state.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the private reply shown to the invoking user.
    ///
    /// Domain and access errors carry their own wording. Everything else is
    /// logged at error level and replaced by a generic message to avoid leaking
    /// operational details into Discord.
    ///
    /// # Returns
    /// - `String` - Message suitable for an ephemeral response
    pub fn user_message(&self) -> String {
        match self {
            Self::TableErr(err) => err.to_string(),
            Self::AccessErr(err) => err.user_message(),
            err => {
                tracing::error!("{}", err);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}
