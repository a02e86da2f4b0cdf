mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use crate::{config::Config, error::AppError, scheduler::rate_limits, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let settings = startup::load_settings(&config).await;
    let store = startup::open_table_store(&config).await?;
    let state = AppState::new(store, settings);

    // Held for the lifetime of the process.
    let _scheduler =
        rate_limits::start_scheduler(state.limits.clone(), state.list_cooldown.clone()).await?;

    tracing::info!("Starting table planner");

    bot::start::start_bot(&config, state).await
}
