use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Starts the Discord bot and runs until the gateway connection shuts down.
///
/// Only the `GUILDS` intent is requested. It delivers the guild and channel
/// events used to archive tables and fills the guild cache that permission
/// checks read from. Members are fetched over HTTP when needed, so no
/// privileged intent is required.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - Shared state handed to the event handler
///
/// # Returns
/// - `Ok(())` if the client shuts down cleanly
/// - `Err(AppError)` if the client can't be built or the connection fails
pub async fn start_bot(config: &Config, state: AppState) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(state))
        .await?;

    tracing::info!("Starting Discord bot...");

    // Blocks until shutdown
    client.start().await?;

    Ok(())
}
