use std::time::Instant;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::rate_limit::{CommandRateLimiter, RateLimiter},
};

/// Starts the rate-limit garbage collection scheduler
///
/// Runs every minute and drops users, guilds and channels whose windows hold
/// no recent calls, so memory stays proportional to recent activity.
///
/// # Arguments
/// - `limits` - Per-user and per-guild command limiters
/// - `list_cooldown` - Per-channel `/list-tables` cooldown
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive for the job to keep firing
/// - `Err(AppError::SchedulerErr)` - The job could not be created or started
pub async fn start_scheduler(
    limits: CommandRateLimiter,
    list_cooldown: RateLimiter,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let limits = limits.clone();
        let list_cooldown = list_cooldown.clone();

        Box::pin(async move {
            let now = Instant::now();
            let removed = limits.purge_idle(now).await + list_cooldown.purge_idle(now).await;
            if removed > 0 {
                tracing::debug!(
                    "Purged {} idle rate-limit windows, {} channel cooldowns still active",
                    removed,
                    list_cooldown.tracked().await
                );
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Rate-limit cleanup scheduler started");

    Ok(scheduler)
}
