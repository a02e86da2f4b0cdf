//! Cron jobs for background maintenance.

pub mod rate_limits;
