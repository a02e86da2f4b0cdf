//! Runtime settings read from `config.json`.

use std::time::Duration;

/// Width in characters of each listing column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub system: usize,
    pub schedule: usize,
    pub gm: usize,
    pub players: usize,
    /// Only shown by `/my-tables`.
    pub status: usize,
}

impl ColumnWidths {
    /// Defaults for `/list-tables`.
    pub const LIST_TABLES: ColumnWidths = ColumnWidths {
        system: 20,
        schedule: 24,
        gm: 24,
        players: 10,
        status: 10,
    };

    /// Defaults for `/my-tables`.
    pub const MY_TABLES: ColumnWidths = ColumnWidths {
        system: 20,
        schedule: 24,
        gm: 24,
        players: 10,
        status: 10,
    };
}

/// A limit of `max_calls` within a sliding `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_calls: u32,
    pub window: Duration,
}

impl RateLimit {
    /// Longest window accepted from the settings document.
    pub const MAX_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

    pub const fn new(max_calls: u32, window_secs: u64) -> Self {
        Self {
            max_calls,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Per-user and per-guild slash command limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub user: RateLimit,
    pub guild: RateLimit,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            user: RateLimit::new(3, 10),
            guild: RateLimit::new(12, 10),
        }
    }
}

/// Everything configurable through the settings document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub list_tables: ColumnWidths,
    pub my_tables: ColumnWidths,
    pub rate_limits: RateLimitSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_tables: ColumnWidths::LIST_TABLES,
            my_tables: ColumnWidths::MY_TABLES,
            rate_limits: RateLimitSettings::default(),
        }
    }
}
