//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, Instrument};

use crate::commands::parse_command;
use crate::db::BookmarkStore;
use crate::errors::{error_logging, AppError, AppResult};
use crate::localization::LocalizationManager;
use crate::observability::telegram_span;

use super::{dispatch_command, HandlerContext, Reply};

/// Handle an incoming message. Anything that is not one of the bot's
/// commands is ignored.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    store: Arc<BookmarkStore>,
    localization: Arc<LocalizationManager>,
    bot_username: Option<String>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some(parsed) = parse_command(text, bot_username.as_deref()) else {
        debug!(chat_id = %msg.chat.id, "Ignoring non-command message");
        return Ok(());
    };

    let command = match &parsed {
        Ok(command) => command.kind(),
        Err(err) => err.command(),
    };
    let user_id = msg.from.as_ref().map(|user| user.id.0 as i64);
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    let span = telegram_span(command.keyword(), user_id);

    async {
        debug!(chat_id = %msg.chat.id, command = %command, "Handling command");

        let ctx = HandlerContext::new(&store, &localization, language_code);
        let reply = dispatch_command(&ctx, parsed)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| error_logging::log_database_error(e, command.keyword(), user_id))?;

        send_reply(&bot, msg.chat.id, reply)
            .await
            .inspect_err(|e| error_logging::log_network_error(e, "send_message", Some(msg.chat.id.0)))
    }
    .instrument(span)
    .await?;

    Ok(())
}

/// Send a handler reply to the chat it came from
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> AppResult<()> {
    match reply {
        Reply::Text(text) => {
            bot.send_message(chat_id, text).await?;
        }
        Reply::Menu { text, keyboard } => {
            bot.send_message(chat_id, text)
                .reply_markup(keyboard)
                .await?;
        }
    }
    Ok(())
}
