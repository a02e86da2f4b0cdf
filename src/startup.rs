//! Process initialisation: logging, settings and the table store.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    data::{settings, table::TableRepository},
    error::AppError,
    model::settings::Settings,
    service::table::TableStore,
};

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,serenity=warn,tracing::span=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Loads `config.json` from the data directory, falling back to defaults.
pub async fn load_settings(config: &Config) -> Settings {
    let settings = settings::load(&config.settings_path()).await;
    tracing::info!(
        "Rate limits: {} per {}s per user, {} per {}s per guild",
        settings.rate_limits.user.max_calls,
        settings.rate_limits.user.window.as_secs(),
        settings.rate_limits.guild.max_calls,
        settings.rate_limits.guild.window.as_secs()
    );
    settings
}

/// Loads the table documents and builds the store.
///
/// # Returns
/// - `Ok(TableStore)` - Store with every persisted table
/// - `Err(AppError::PersistenceErr)` - A document is corrupt or unreadable; the bot must not start
pub async fn open_table_store(config: &Config) -> Result<TableStore, AppError> {
    let repo = TableRepository::new(&config.data_dir);
    tracing::info!(
        "Loading tables from {} and {}",
        repo.active_path().display(),
        repo.archived_path().display()
    );

    match TableStore::open(repo).await {
        Ok(store) => Ok(store),
        Err(e) => {
            if e.is_corrupt() {
                tracing::error!(
                    "Refusing to start with corrupt table data; fix or move the file and restart: {}",
                    e
                );
            } else {
                tracing::error!("Failed to load table data: {}", e);
            }
            Err(e.into())
        }
    }
}
