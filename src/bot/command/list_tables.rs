use std::time::Instant;

use serenity::all::{
    CommandInteraction, Context, CreateAllowedMentions, CreateCommand,
    CreateInteractionResponseFollowup,
};

use crate::{
    bot::{
        command::visible_tables,
        permission::NameResolver,
        respond::{self, Responder},
    },
    error::{
        access::{AccessError, RateLimitScope},
        AppError,
    },
    service::{
        format::{render_pages, ListingColumns, ListingRow, MESSAGE_LIMIT},
        rate_limit::{Decision, RateLimiter},
    },
    state::AppState,
};

pub const NAME: &str = "list-tables";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Posts all active tables into the current channel.")
}

/// What `/list-tables` should do in a channel.
#[derive(Debug, PartialEq, Eq)]
enum Listing {
    /// Nothing to list; the cooldown is left untouched.
    Empty,
    /// Cooldown claimed; post the listing.
    Post,
}

/// Claims the channel cooldown for a non-empty listing.
///
/// # Returns
/// - `Ok(Listing::Empty)` - No tables; nothing was recorded
/// - `Ok(Listing::Post)` - Cooldown claimed
/// - `Err(AccessError::RateLimited)` - Channel posted a listing too recently
async fn claim_listing(
    cooldown: &RateLimiter,
    channel_id: u64,
    table_count: usize,
    now: Instant,
) -> Result<Listing, AccessError> {
    if table_count == 0 {
        return Ok(Listing::Empty);
    }

    match cooldown.check_at(channel_id, now).await {
        Decision::Allowed => Ok(Listing::Post),
        Decision::Denied { retry_after } => Err(AccessError::RateLimited {
            scope: RateLimitScope::Channel,
            retry_after_secs: Decision::retry_after_secs(retry_after),
        }),
    }
}

/// Posts a compact listing of the visible tables.
///
/// The listing is public in a server channel, so each channel gets one post
/// per cooldown. The cooldown is claimed before posting so two simultaneous
/// calls can't both post; an empty reply does not claim it.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let in_guild = command.guild_id.is_some();
    let channel_id = command.channel_id.get();
    let responder = Responder::Command(command);

    let tables = visible_tables(state, ctx, command).await;
    let listing = claim_listing(&state.list_cooldown, channel_id, tables.len(), Instant::now())
        .await
        .inspect_err(|_| {
            tracing::info!(
                "/list-tables throttled in channel {} for user {} ({})",
                channel_id,
                command.user.name,
                command.user.id
            )
        })?;

    if listing == Listing::Empty {
        respond::reply(
            ctx,
            responder,
            "There are no active tables in this context.",
            in_guild,
        )
        .await;
        return Ok(());
    }

    let mut names = NameResolver::new(ctx);
    let mut rows = Vec::with_capacity(tables.len());
    for table in &tables {
        let gm = names.display_name(table.gm_id, table.guild_id).await;
        rows.push(ListingRow::from_table(table, gm, None));
    }

    let pages = render_pages(
        &rows,
        &state.settings.list_tables,
        ListingColumns::Standard,
        MESSAGE_LIMIT,
    );
    let mut pages = pages.into_iter();

    let Some(first) = pages.next() else {
        return Ok(());
    };
    if !respond::reply(ctx, responder, first, false).await {
        return Ok(());
    }
    for page in pages {
        let message = CreateInteractionResponseFollowup::new()
            .content(page)
            .allowed_mentions(CreateAllowedMentions::new());
        respond::followup(ctx, responder, message).await;
    }

    tracing::info!("Posted {} table(s) to channel {}", tables.len(), channel_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::settings::RateLimit, service::rate_limit::LIST_TABLES_COOLDOWN};

    fn cooldown() -> RateLimiter {
        RateLimiter::new(RateLimit {
            max_calls: 1,
            window: LIST_TABLES_COOLDOWN,
        })
    }

    /// Tests that an empty listing leaves the channel free for a real one.
    ///
    /// Expected: Empty, then Post, then a channel-scoped rejection
    #[tokio::test]
    async fn empty_listing_does_not_claim_cooldown() {
        let cooldown = cooldown();
        let now = Instant::now();

        assert_eq!(claim_listing(&cooldown, 1, 0, now).await, Ok(Listing::Empty));
        assert_eq!(claim_listing(&cooldown, 1, 3, now).await, Ok(Listing::Post));
        assert_eq!(
            claim_listing(&cooldown, 1, 3, now).await,
            Err(AccessError::RateLimited {
                scope: RateLimitScope::Channel,
                retry_after_secs: 60,
            })
        );
    }
}
