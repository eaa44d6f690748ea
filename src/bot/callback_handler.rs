//! Callback Handler module for processing selection button presses

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MaybeInaccessibleMessage;
use tracing::{debug, info, Instrument};

use crate::db::BookmarkStore;
use crate::errors::{error_logging, AppError, AppResult};
use crate::localization::{t_lang, LocalizationManager};
use crate::observability::telegram_span;

use super::ui_builder::parse_delete_payload;
use super::HandlerContext;

/// Delete the bookmark named by a selection button payload and return the
/// text the prompt message should be replaced with.
///
/// The confirmation is the same whether or not a row was removed: a stale
/// button for an already deleted bookmark still reports success.
pub async fn handle_delete_confirmation(
    ctx: &HandlerContext<'_>,
    data: Option<&str>,
) -> Result<String> {
    match parse_delete_payload(data.unwrap_or_default()) {
        Ok(bookmark_id) => {
            let removed = ctx.store.delete_by_id(bookmark_id).await?;
            info!(bookmark_id = %bookmark_id, removed = %removed, "Handled delete selection");
        }
        Err(err) => {
            error_logging::log_validation_error(&err, "delete_confirmation", None, data);
        }
    }

    Ok(t_lang(ctx.localization, "bookmark-deleted", ctx.language_code))
}

/// Handle callback queries from the deletion menu
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    store: Arc<BookmarkStore>,
    localization: Arc<LocalizationManager>,
) -> Result<()> {
    let user_id = q.from.id.0 as i64;
    let span = telegram_span("callback_handler", Some(user_id));

    async {
        // Stop the client-side spinner before doing any work
        bot.answer_callback_query(q.id.clone())
            .await
            .map_err(AppError::from)
            .inspect_err(|e| {
                error_logging::log_network_error(e, "answer_callback_query", None)
            })?;

        let ctx = HandlerContext::new(&store, &localization, q.from.language_code.as_deref());
        let text = handle_delete_confirmation(&ctx, q.data.as_deref())
            .await
            .map_err(AppError::from)
            .inspect_err(|e| {
                error_logging::log_database_error(e, "delete_confirmation", Some(user_id))
            })?;

        match &q.message {
            Some(MaybeInaccessibleMessage::Regular(msg)) => {
                bot.edit_message_text(msg.chat.id, msg.id, text)
                    .await
                    .map_err(AppError::from)
                    .inspect_err(|e| {
                        error_logging::log_network_error(
                            e,
                            "edit_message_text",
                            Some(msg.chat.id.0),
                        )
                    })?;
            }
            Some(MaybeInaccessibleMessage::Inaccessible(_)) | None => {
                debug!(user_id = %user_id, "Prompt message is not accessible, skipping edit");
            }
        }

        AppResult::Ok(())
    }
    .instrument(span)
    .await?;

    Ok(())
}
