//! # Application Configuration
//!
//! The bot recognizes a single application setting, the `BOT_TOKEN`
//! environment variable. Everything else is a fixed default collected here so
//! startup code has one structured object to validate and pass around.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Database file used when none is configured, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "bookmarks.db";

/// Bot-specific configuration settings
#[derive(Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &mask_token(&self.token))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config("Bot token cannot be empty".to_string()));
        }

        let Some((bot_id, secret)) = self.token.split_once(':') else {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        };

        if bot_id.parse::<u64>().is_err() {
            return Err(AppError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if secret.is_empty() || secret.contains(':') {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(AppError::Config("HTTP timeout cannot be 0".to_string()));
        }

        if self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "HTTP timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Database configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file; created on first run
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.path.trim().is_empty() {
            return Err(AppError::Config(
                "Database path cannot be empty".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(AppError::Config(
                "Database max connections cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        let token = env::var(BOT_TOKEN_VAR).map_err(|_| {
            AppError::Config(format!(
                "{BOT_TOKEN_VAR} environment variable is required but not set. Please set it to your Telegram bot token."
            ))
        })?;

        Ok(Self::with_token(token))
    }

    /// Build a configuration around the given token, everything else defaulted
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            bot: BotConfig {
                token: token.into(),
                ..BotConfig::default()
            },
            database: DatabaseConfig::default(),
        }
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.bot.validate()?;
        self.database.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: bot_token={}, database_path={}, max_connections={}, http_timeout_secs={}",
            mask_token(&self.bot.token),
            self.database.path,
            self.database.max_connections,
            self.bot.http_timeout_secs
        )
    }
}

/// Mask a secret for safe logging: first 7 + "***" + last 4 chars.
/// Secrets of 11 characters or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}
