//! Interaction dispatcher.
//!
//! Routes slash commands, component clicks and modal submissions to their
//! handlers. Handlers return `AppError`; this is the boundary where errors
//! become a private reply to the user.

use serenity::all::{Context, Interaction};

use crate::{
    bot::{
        command, component, modal,
        respond::{self, Responder},
    },
    state::AppState,
};

/// Handles the interaction_create event.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context
/// - `interaction` - The interaction to answer
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            tracing::info!(
                "Command /{} invoked by {} ({})",
                command.data.name,
                command.user.name,
                command.user.id
            );

            if let Err(err) = command::handle_command(state, &ctx, &command).await {
                respond::report_error(&ctx, Responder::Command(&command), &err).await;
            }
        }
        Interaction::Component(component) => {
            tracing::debug!(
                "Component {} used by {} ({})",
                component.data.custom_id,
                component.user.name,
                component.user.id
            );

            if let Err(err) = component::handle_component(state, &ctx, &component).await {
                respond::report_error(&ctx, Responder::Component(&component), &err).await;
            }
        }
        Interaction::Modal(submission) => {
            tracing::debug!(
                "Modal {} submitted by {} ({})",
                submission.data.custom_id,
                submission.user.name,
                submission.user.id
            );

            if let Err(err) = modal::handle_modal(state, &ctx, &submission).await {
                respond::report_error(&ctx, Responder::Modal(&submission), &err).await;
            }
        }
        _ => {}
    }
}
