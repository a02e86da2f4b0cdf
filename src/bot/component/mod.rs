//! Button and select menu interactions.

use serenity::all::{ComponentInteraction, Context};

use crate::{bot::ui::custom_id::CustomId, error::AppError, state::AppState};

pub mod select;
pub mod signup;

/// Routes a component interaction by its custom id.
pub async fn handle_component(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    match CustomId::parse(&component.data.custom_id) {
        Some(CustomId::Join(table_id)) => signup::join(state, ctx, component, &table_id).await,
        Some(CustomId::Leave(table_id)) => signup::leave(state, ctx, component, &table_id).await,
        Some(CustomId::ArchiveSelect) => select::archive(state, ctx, component).await,
        Some(CustomId::EditSelect) => select::edit(state, ctx, component).await,
        _ => {
            tracing::warn!("Received unknown component {}", component.data.custom_id);
            Ok(())
        }
    }
}
