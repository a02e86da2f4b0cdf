//! Modal submissions.

use serenity::all::{Context, ModalInteraction};

use crate::{bot::ui::custom_id::CustomId, error::AppError, state::AppState};

pub mod table_form;

/// Routes a submitted modal by its custom id.
pub async fn handle_modal(
    state: &AppState,
    ctx: &Context,
    submission: &ModalInteraction,
) -> Result<(), AppError> {
    match CustomId::parse(&submission.data.custom_id) {
        Some(CustomId::CreateModal) => table_form::submit_create(state, ctx, submission).await,
        Some(CustomId::EditModal(table_id)) => {
            table_form::submit_edit(state, ctx, submission, &table_id).await
        }
        _ => {
            tracing::warn!("Received unknown modal {}", submission.data.custom_id);
            Ok(())
        }
    }
}
