//! Sending replies, follow-ups and DMs.
//!
//! Delivery failures here are never fatal to the handler that triggered them:
//! the state change already happened. They are logged, at warn level when the
//! bot simply lacks access and at error level otherwise.

use serenity::all::{
    ChannelId, CommandInteraction, ComponentInteraction, Context, CreateAllowedMentions,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, Message, ModalInteraction, UserId,
};
use serenity::http::HttpError;

use crate::error::AppError;

/// Appended to confirmations when a change could not be written to disk.
pub const UNSAVED_NOTICE: &str =
    "Note: the change could not be saved to disk yet and will be saved with the next update.";

/// The interaction being answered.
#[derive(Clone, Copy)]
pub enum Responder<'a> {
    Command(&'a CommandInteraction),
    Component(&'a ComponentInteraction),
    Modal(&'a ModalInteraction),
}

impl Responder<'_> {
    async fn create_response(
        self,
        ctx: &Context,
        response: CreateInteractionResponse,
    ) -> serenity::Result<()> {
        match self {
            Self::Command(i) => i.create_response(&ctx.http, response).await,
            Self::Component(i) => i.create_response(&ctx.http, response).await,
            Self::Modal(i) => i.create_response(&ctx.http, response).await,
        }
    }

    async fn create_followup(
        self,
        ctx: &Context,
        followup: CreateInteractionResponseFollowup,
    ) -> serenity::Result<Message> {
        match self {
            Self::Command(i) => i.create_followup(&ctx.http, followup).await,
            Self::Component(i) => i.create_followup(&ctx.http, followup).await,
            Self::Modal(i) => i.create_followup(&ctx.http, followup).await,
        }
    }

    fn channel_id(self) -> ChannelId {
        match self {
            Self::Command(i) => i.channel_id,
            Self::Component(i) => i.channel_id,
            Self::Modal(i) => i.channel_id,
        }
    }
}

/// HTTP status of a failed Discord request, if the error came from one.
pub fn http_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}

/// Whether Discord refused the request for lack of access.
pub fn is_forbidden(err: &serenity::Error) -> bool {
    http_status(err) == Some(403)
}

/// Whether the target of the request no longer exists.
pub fn is_not_found(err: &serenity::Error) -> bool {
    http_status(err) == Some(404)
}

fn log_failure(action: &str, target: impl std::fmt::Display, err: &serenity::Error) {
    if is_forbidden(err) {
        tracing::warn!("Missing permission to {} in {}", action, target);
    } else {
        tracing::error!("Failed to {} in {}: {}", action, target, err);
    }
}

/// Answers the interaction with a text message.
///
/// # Arguments
/// - `ctx` - Discord context
/// - `responder` - Interaction being answered
/// - `content` - Message text
/// - `ephemeral` - Whether only the invoking user sees the reply
///
/// # Returns
/// - `bool` - Whether the reply was delivered
pub async fn reply(
    ctx: &Context,
    responder: Responder<'_>,
    content: impl Into<String>,
    ephemeral: bool,
) -> bool {
    let message = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(ephemeral)
        .allowed_mentions(CreateAllowedMentions::new());

    match responder
        .create_response(ctx, CreateInteractionResponse::Message(message))
        .await
    {
        Ok(()) => true,
        Err(err) => {
            log_failure("respond", responder.channel_id(), &err);
            false
        }
    }
}

/// Answers the interaction privately.
pub async fn reply_ephemeral(ctx: &Context, responder: Responder<'_>, content: impl Into<String>) -> bool {
    reply(ctx, responder, content, true).await
}

/// Sends a follow-up after the interaction has been answered or deferred.
pub async fn followup(
    ctx: &Context,
    responder: Responder<'_>,
    followup: CreateInteractionResponseFollowup,
) -> bool {
    match responder.create_followup(ctx, followup).await {
        Ok(_) => true,
        Err(err) => {
            log_failure("send follow-up", responder.channel_id(), &err);
            false
        }
    }
}

/// Sends a private text follow-up.
pub async fn followup_ephemeral(
    ctx: &Context,
    responder: Responder<'_>,
    content: impl Into<String>,
) -> bool {
    let message = CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true)
        .allowed_mentions(CreateAllowedMentions::new());
    followup(ctx, responder, message).await
}

/// Reports a handler error to the invoking user.
///
/// Tries a direct response first; if the interaction was already answered or
/// deferred, falls back to a follow-up.
pub async fn report_error(ctx: &Context, responder: Responder<'_>, err: &AppError) {
    let content = err.user_message();
    tracing::debug!("Interaction failed: {}", err);

    let message = CreateInteractionResponseMessage::new()
        .content(content.clone())
        .ephemeral(true);
    if responder
        .create_response(ctx, CreateInteractionResponse::Message(message))
        .await
        .is_ok()
    {
        return;
    }

    followup_ephemeral(ctx, responder, content).await;
}

/// Sends a direct message to a user, logging failures.
///
/// Users can close their DMs, so a failure here is expected now and then.
pub async fn direct_message(ctx: &Context, user_id: u64, content: impl Into<String>) {
    let user = UserId::new(user_id);
    let message = CreateMessage::new().content(content);

    if let Err(err) = user.direct_message(ctx, message).await {
        log_failure("send a direct message", format!("DM with user {}", user), &err);
    }
}

/// Posts a plain message in a channel, logging failures.
///
/// Only the mentioned users are pinged; role and everyone mentions are suppressed.
pub async fn announce(ctx: &Context, channel_id: u64, content: impl Into<String>, ping: &[u64]) {
    let channel = ChannelId::new(channel_id);
    let mentions = CreateAllowedMentions::new().users(ping.iter().map(|id| UserId::new(*id)));
    let message = CreateMessage::new().content(content).allowed_mentions(mentions);

    if let Err(err) = channel.send_message(&ctx.http, message).await {
        log_failure("post an announcement", format!("channel {}", channel), &err);
    }
}
