//! # Bookmark Telegram Bot
//!
//! A Telegram bot that stores, edits, deletes and lists named URL bookmarks
//! in a local SQLite database.

pub mod bot;
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod localization;
pub mod observability;

// Re-export types for easier access
pub use commands::{Command, CommandError, CommandKind};
pub use db::{Bookmark, BookmarkStore};
