//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `command_handlers`: Start, Add, Edit, Delete-Prompt and List logic
//! - `callback_handler`: Delete-Confirm logic for selection button presses
//! - `message_handler`: Telegram glue for incoming command messages
//! - `ui_builder`: Creates keyboards and formats messages
//!
//! Handler logic never talks to Telegram directly. It returns a [`Reply`]
//! that the Telegram glue sends, so the logic can be driven without a network.

pub mod callback_handler;
pub mod command_handlers;
pub mod message_handler;
pub mod ui_builder;

use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;

use crate::commands::{Command, CommandError};
use crate::db::BookmarkStore;
use crate::localization::LocalizationManager;

/// Common context for bot handlers containing shared dependencies
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub store: &'a BookmarkStore,
    pub localization: &'a LocalizationManager,
    pub language_code: Option<&'a str>,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        store: &'a BookmarkStore,
        localization: &'a LocalizationManager,
        language_code: Option<&'a str>,
    ) -> Self {
        Self {
            store,
            localization,
            language_code,
        }
    }
}

/// The single outbound message a command produces
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Menu {
        text: String,
        keyboard: InlineKeyboardMarkup,
    },
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Text(text) => text,
            Reply::Menu { text, .. } => text,
        }
    }
}

/// Route a parsed command to its handler
pub async fn dispatch_command(
    ctx: &HandlerContext<'_>,
    command: Result<Command, CommandError>,
) -> Result<Reply> {
    match command {
        Ok(Command::Start) => Ok(command_handlers::handle_start_command(ctx)),
        Ok(Command::Add(args)) => command_handlers::handle_add_command(ctx, &args).await,
        Ok(Command::Edit(args)) => command_handlers::handle_edit_command(ctx, &args).await,
        Ok(Command::Delete) => command_handlers::handle_delete_command(ctx).await,
        Ok(Command::List) => command_handlers::handle_list_command(ctx).await,
        Err(err) => Ok(command_handlers::handle_command_error(ctx, &err)),
    }
}

/// Build the update dispatch tree: messages go to the command handlers, any
/// button press goes to the delete confirmation.
pub fn schema(
    store: Arc<BookmarkStore>,
    localization: Arc<LocalizationManager>,
    bot_username: Option<String>,
) -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint({
            let store = Arc::clone(&store);
            let localization = Arc::clone(&localization);
            move |bot: Bot, msg: Message| {
                let store = Arc::clone(&store);
                let localization = Arc::clone(&localization);
                let bot_username = bot_username.clone();
                async move {
                    message_handler::message_handler(bot, msg, store, localization, bot_username)
                        .await
                }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let store = Arc::clone(&store);
            let localization = Arc::clone(&localization);
            move |bot: Bot, q: CallbackQuery| {
                let store = Arc::clone(&store);
                let localization = Arc::clone(&localization);
                async move { callback_handler::callback_handler(bot, q, store, localization).await }
            }
        }))
}

pub use callback_handler::{callback_handler, handle_delete_confirmation};
pub use message_handler::message_handler;
