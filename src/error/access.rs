use thiserror::Error;

/// Which limiter rejected a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    User,
    Guild,
    Channel,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// User lacks ownership of the table or moderation rights in its channel.
    #[error("{0}")]
    PermissionDenied(String),

    /// Command was rejected by a rate limiter.
    ///
    /// # Fields
    /// - `scope` - Limiter that rejected the command
    /// - `retry_after_secs` - Whole seconds until the oldest counted call leaves the window
    #[error("Rate limited ({scope:?}), retry after {retry_after_secs}s")]
    RateLimited {
        scope: RateLimitScope,
        retry_after_secs: u64,
    },

    /// Command was used outside a server text channel.
    #[error("This command can only be used in a server channel.")]
    GuildOnly,
}

impl AccessError {
    /// Text shown privately to the user who triggered the error.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited {
                scope: RateLimitScope::User,
                retry_after_secs,
            } => format!(
                "Please wait {} more second(s) before running this command again.",
                retry_after_secs
            ),
            Self::RateLimited {
                scope: RateLimitScope::Guild,
                retry_after_secs,
            } => format!(
                "This server is busy. Please wait {} more second(s) before trying again.",
                retry_after_secs
            ),
            Self::RateLimited {
                scope: RateLimitScope::Channel,
                retry_after_secs,
            } => format!(
                "Please wait {} more second(s) before listing tables again.",
                retry_after_secs
            ),
            other => other.to_string(),
        }
    }
}
