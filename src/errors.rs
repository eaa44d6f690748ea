//! # Application Error Types
//!
//! This module defines the error taxonomy used throughout the bookmark bot.
//! Handlers convert store failures into [`AppError::Database`] and Telegram
//! failures into [`AppError::Network`] before logging them. Missing command
//! arguments never reach this type: they are reported back to the user as
//! usage replies (see [`crate::commands::CommandError`]).

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (malformed callback payloads, inputs, etc.)
    Validation(String),
    /// Database operation errors
    Database(String),
    /// Telegram API / network errors
    Network(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Database(msg) => write!(f, "[DATABASE] {}", msg),
            AppError::Network(msg) => write!(f, "[NETWORK] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Store operations return `anyhow` errors with context attached; a failure
/// whose cause chain holds a `sqlx::Error` is a database error, anything else
/// is internal. The full context chain is kept in the message.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if err.chain().any(|cause| cause.is::<sqlx::Error>()) {
            AppError::Database(message)
        } else {
            AppError::Internal(message)
        }
    }
}

impl From<teloxide::RequestError> for AppError {
    fn from(err: teloxide::RequestError) -> Self {
        AppError::Network(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities
pub mod error_logging {
    use tracing::{error, warn};

    /// Log database operation errors with contextual information
    pub fn log_database_error(
        error: &impl std::fmt::Display,
        operation: &str,
        user_id: Option<i64>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            user_id = ?user_id,
            "Database operation failed"
        );
    }

    /// Log Telegram API errors with the failing operation
    pub fn log_network_error(error: &impl std::fmt::Display, operation: &str, chat_id: Option<i64>) {
        error!(
            error = %error,
            operation = %operation,
            chat_id = ?chat_id,
            "Telegram request failed"
        );
    }

    /// Log rejected input. Truncates long values so payloads never flood the log.
    pub fn log_validation_error(
        error: &impl std::fmt::Display,
        operation: &str,
        user_id: Option<i64>,
        input_value: Option<&str>,
    ) {
        warn!(
            error = %error,
            operation = %operation,
            user_id = ?user_id,
            input_value = ?input_value.map(|v| v.chars().take(100).collect::<String>()),
            "Validation failed"
        );
    }

    /// Log configuration errors during startup
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }
}
