//! Observability module for structured logging setup.
//!
//! This module provides:
//! - `tracing-subscriber` initialization (JSON by default, pretty for development)
//! - Span helpers for Telegram updates and database operations
//!
//! `LOG_FORMAT` picks the output format and `RUST_LOG` adds filter
//! directives. Both only tune logging: neither is read anywhere else, and the
//! bot replies and stores data the same way whatever they are set to.

use anyhow::Result;
use tracing_subscriber::prelude::*;

/// Log output format, selected by the `LOG_FORMAT` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; anything other than `pretty` means JSON
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Initialize structured logging with tracing
pub fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("bookmark_bot=info".parse()?)
        .add_directive("sqlx=warn".parse()?)
        .add_directive("teloxide=warn".parse()?);

    let format = LogFormat::from_env();
    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_thread_names(false),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_thread_names(true),
                )
                .try_init()?;
        }
    }

    tracing::info!(log_format = ?format, "Tracing initialized with structured logging");
    Ok(())
}

/// Create a span for database operations
pub fn db_span(operation: &str, table: &str) -> tracing::Span {
    tracing::debug_span!("db", operation = %operation, table = %table)
}

/// Create a span for handling one Telegram update
pub fn telegram_span(operation: &str, user_id: Option<i64>) -> tracing::Span {
    tracing::info_span!("telegram", operation = %operation, user_id = ?user_id)
}
