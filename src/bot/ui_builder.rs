//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::db::{BookmarkLabel, BookmarkLink};
use crate::errors::{AppError, AppResult};

/// Create the deletion menu: one button per bookmark, one per row.
/// The button carries the bookmark id as its callback payload.
pub fn create_delete_selection_keyboard(labels: &[BookmarkLabel]) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = labels
        .iter()
        .map(|label| {
            vec![InlineKeyboardButton::callback(
                label.name.clone(),
                delete_payload(label.id),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Callback payload for deleting a bookmark
pub fn delete_payload(bookmark_id: i64) -> String {
    bookmark_id.to_string()
}

/// Recover the bookmark id from a callback payload
pub fn parse_delete_payload(data: &str) -> AppResult<i64> {
    data.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("callback payload '{data}' is not a bookmark id")))
}

/// Format bookmarks as `name: url` lines
pub fn format_bookmark_list(links: &[BookmarkLink]) -> String {
    links
        .iter()
        .map(|link| format!("{}: {}", link.name, link.url))
        .collect::<Vec<_>>()
        .join("\n")
}
