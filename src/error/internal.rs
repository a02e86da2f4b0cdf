use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Results in a generic error message shown to the user.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored table breaks a roster invariant (over capacity, duplicate or GM seat).
    #[error("Table roster is inconsistent: {0}")]
    InconsistentTable(String),

    /// A spawned store operation panicked or was aborted by the runtime.
    #[error("Store task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
