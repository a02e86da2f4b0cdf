use std::sync::Arc;

use crate::{
    model::settings::{RateLimit, Settings},
    service::{
        rate_limit::{CommandRateLimiter, RateLimiter, LIST_TABLES_COOLDOWN},
        table::TableStore,
    },
};

/// Shared state handed to every event handler.
///
/// Cloning is cheap; the store and limiters share their state between clones.
#[derive(Clone)]
pub struct AppState {
    pub store: TableStore,
    /// Per-user and per-guild slash command limits.
    pub limits: CommandRateLimiter,
    /// One public `/list-tables` post per channel per cooldown.
    pub list_cooldown: RateLimiter,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: TableStore, settings: Settings) -> Self {
        Self {
            store,
            limits: CommandRateLimiter::new(&settings.rate_limits),
            list_cooldown: RateLimiter::new(RateLimit {
                max_calls: 1,
                window: LIST_TABLES_COOLDOWN,
            }),
            settings: Arc::new(settings),
        }
    }
}
