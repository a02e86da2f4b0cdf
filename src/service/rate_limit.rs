//! Sliding-window rate limiting for slash commands.
//!
//! Each limiter keeps, per subject, the instants of the calls it admitted
//! within the window. A call is admitted while fewer than `max_calls` remain in
//! the window; rejected calls are not recorded, so hammering a command does not
//! push the reset further out. Windows live in memory only.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::{
    error::access::{AccessError, RateLimitScope},
    model::settings::{RateLimit, RateLimitSettings},
};

/// Cooldown between public `/list-tables` posts in one channel.
pub const LIST_TABLES_COOLDOWN: Duration = Duration::from_secs(60);

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Call rejected; the oldest counted call leaves the window after `retry_after`.
    Denied { retry_after: Duration },
}

impl Decision {
    /// Whole seconds to report to the user, never less than one.
    pub fn retry_after_secs(retry_after: Duration) -> u64 {
        let secs = retry_after.as_secs();
        if retry_after.subsec_nanos() > 0 {
            secs.saturating_add(1)
        } else {
            secs.max(1)
        }
    }
}

/// A sliding-window log limiter keyed by subject id.
///
/// Cheap to clone; clones share their windows.
#[derive(Clone)]
pub struct RateLimiter {
    limit: RateLimit,
    windows: Arc<Mutex<HashMap<u64, VecDeque<Instant>>>>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Checks and records a call for `subject` at `now`.
    ///
    /// # Arguments
    /// - `subject` - User, guild or channel id
    /// - `now` - Instant of the call
    ///
    /// # Returns
    /// - `Decision::Allowed` - Call admitted and recorded
    /// - `Decision::Denied` - Window full; nothing recorded
    pub async fn check_at(&self, subject: u64, now: Instant) -> Decision {
        let mut windows = self.windows.lock().await;
        let window = windows.entry(subject).or_default();

        prune(window, now, self.limit.window);

        if window.len() >= self.limit.max_calls as usize {
            let retry_after = window
                .front()
                .map(|oldest| match oldest.checked_add(self.limit.window) {
                    Some(reset) => reset.saturating_duration_since(now),
                    None => self.limit.window,
                })
                .unwrap_or_default();
            return Decision::Denied { retry_after };
        }

        window.push_back(now);
        Decision::Allowed
    }

    /// Drops subjects with no call inside the window.
    ///
    /// # Returns
    /// - `usize` - Number of subjects removed
    pub async fn purge_idle(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, window| {
            prune(window, now, self.limit.window);
            !window.is_empty()
        });
        before - windows.len()
    }

    /// Number of subjects currently tracked.
    pub async fn tracked(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Removes entries at least `window` old.
fn prune(window: &mut VecDeque<Instant>, now: Instant, length: Duration) {
    while let Some(oldest) = window.front() {
        if now.saturating_duration_since(*oldest) >= length {
            window.pop_front();
        } else {
            break;
        }
    }
}

/// The per-user and per-guild limiters every slash command passes through.
#[derive(Clone)]
pub struct CommandRateLimiter {
    user: RateLimiter,
    guild: RateLimiter,
}

impl CommandRateLimiter {
    pub fn new(settings: &RateLimitSettings) -> Self {
        Self {
            user: RateLimiter::new(settings.user),
            guild: RateLimiter::new(settings.guild),
        }
    }

    /// Admits a command from `user_id`, optionally inside `guild_id`.
    ///
    /// The user limiter is checked first. A call rejected by the guild limiter
    /// still counts against the user, so one user can't drain a busy guild's
    /// budget by retrying.
    ///
    /// # Returns
    /// - `Ok(())` - Command may run
    /// - `Err(AccessError::RateLimited)` - Rejected, with the scope and wait time
    pub async fn admit(&self, user_id: u64, guild_id: Option<u64>) -> Result<(), AccessError> {
        self.admit_at(user_id, guild_id, Instant::now()).await
    }

    pub async fn admit_at(
        &self,
        user_id: u64,
        guild_id: Option<u64>,
        now: Instant,
    ) -> Result<(), AccessError> {
        if let Decision::Denied { retry_after } = self.user.check_at(user_id, now).await {
            return Err(AccessError::RateLimited {
                scope: RateLimitScope::User,
                retry_after_secs: Decision::retry_after_secs(retry_after),
            });
        }

        if let Some(guild_id) = guild_id {
            if let Decision::Denied { retry_after } = self.guild.check_at(guild_id, now).await {
                return Err(AccessError::RateLimited {
                    scope: RateLimitScope::Guild,
                    retry_after_secs: Decision::retry_after_secs(retry_after),
                });
            }
        }

        Ok(())
    }

    /// Drops idle windows from both limiters.
    pub async fn purge_idle(&self, now: Instant) -> usize {
        self.user.purge_idle(now).await + self.guild.purge_idle(now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_calls: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimit::new(max_calls, window_secs))
    }

    /// Tests the basic window with a limit of 3 per 10 seconds.
    ///
    /// Verifies that three calls are admitted, the fourth is denied, and calls
    /// are admitted again once the window has passed.
    ///
    /// Expected: Allowed x3, Denied, then Allowed after 10s
    #[tokio::test]
    async fn allows_up_to_limit_then_denies() {
        let limiter = limiter(3, 10);
        let start = Instant::now();

        for i in 0..3 {
            assert_eq!(
                limiter.check_at(1, start + Duration::from_secs(i)).await,
                Decision::Allowed
            );
        }
        assert_eq!(
            limiter.check_at(1, start + Duration::from_secs(3)).await,
            Decision::Denied {
                retry_after: Duration::from_secs(7)
            }
        );
        assert_eq!(
            limiter.check_at(1, start + Duration::from_secs(10)).await,
            Decision::Allowed
        );
    }

    /// Tests that denied calls don't extend the window.
    ///
    /// Expected: allowed at the original reset time despite repeated denials
    #[tokio::test]
    async fn denied_calls_are_not_recorded() {
        let limiter = limiter(1, 10);
        let start = Instant::now();

        assert_eq!(limiter.check_at(1, start).await, Decision::Allowed);
        for i in 1..10 {
            assert!(matches!(
                limiter.check_at(1, start + Duration::from_secs(i)).await,
                Decision::Denied { .. }
            ));
        }
        assert_eq!(
            limiter.check_at(1, start + Duration::from_secs(10)).await,
            Decision::Allowed
        );
    }

    #[tokio::test]
    async fn subjects_are_independent() {
        let limiter = limiter(1, 10);
        let now = Instant::now();

        assert_eq!(limiter.check_at(1, now).await, Decision::Allowed);
        assert_eq!(limiter.check_at(2, now).await, Decision::Allowed);
        assert!(matches!(limiter.check_at(1, now).await, Decision::Denied { .. }));
    }

    /// Tests garbage collection of idle subjects.
    ///
    /// Expected: only the subject with a call inside the window survives
    #[tokio::test]
    async fn purge_drops_idle_subjects() {
        let limiter = limiter(3, 10);
        let start = Instant::now();

        limiter.check_at(1, start).await;
        limiter.check_at(2, start + Duration::from_secs(8)).await;

        let removed = limiter.purge_idle(start + Duration::from_secs(12)).await;

        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked().await, 1);
    }

    /// Tests a window too long to add to an instant.
    ///
    /// Expected: Denied with the full window as retry hint, no overflow
    #[tokio::test]
    async fn oversized_window_denies_without_overflow() {
        let limiter = RateLimiter::new(RateLimit {
            max_calls: 1,
            window: Duration::MAX,
        });
        let now = Instant::now();

        assert_eq!(limiter.check_at(1, now).await, Decision::Allowed);
        assert_eq!(
            limiter.check_at(1, now).await,
            Decision::Denied {
                retry_after: Duration::MAX
            }
        );
    }

    #[test]
    fn retry_after_rounds_up() {
        assert_eq!(Decision::retry_after_secs(Duration::from_millis(1500)), 2);
        assert_eq!(Decision::retry_after_secs(Duration::from_secs(7)), 7);
        assert_eq!(Decision::retry_after_secs(Duration::ZERO), 1);
        assert_eq!(Decision::retry_after_secs(Duration::MAX), u64::MAX);
    }

    /// Tests the combined user and guild check.
    ///
    /// Verifies that the guild budget is shared between users and that DMs
    /// skip the guild limiter.
    ///
    /// Expected: Guild-scoped rejection for the third user, DM still allowed
    #[tokio::test]
    async fn command_limiter_checks_user_then_guild() {
        let limits = CommandRateLimiter::new(&RateLimitSettings {
            user: RateLimit::new(1, 10),
            guild: RateLimit::new(2, 10),
        });
        let now = Instant::now();

        assert!(limits.admit_at(1, Some(100), now).await.is_ok());
        assert!(limits.admit_at(2, Some(100), now).await.is_ok());
        assert!(matches!(
            limits.admit_at(3, Some(100), now).await,
            Err(AccessError::RateLimited {
                scope: RateLimitScope::Guild,
                ..
            })
        ));
        assert!(matches!(
            limits.admit_at(1, None, now).await,
            Err(AccessError::RateLimited {
                scope: RateLimitScope::User,
                retry_after_secs: 10
            })
        ));
        assert!(limits.admit_at(4, None, now).await.is_ok());
    }
}
