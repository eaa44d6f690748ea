use anyhow::{Context, Result};
use bookmark_bot::bot;
use bookmark_bot::config::{AppConfig, BOT_TOKEN_VAR};
use bookmark_bot::db::BookmarkStore;
use bookmark_bot::errors::error_logging;
use bookmark_bot::localization;
use bookmark_bot::observability;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::info;

/// Load and validate configuration, logging the failure before aborting
fn load_configuration() -> Result<AppConfig> {
    let config = AppConfig::from_env()
        .and_then(|config| config.validate().map(|()| config))
        .inspect_err(|e| error_logging::log_config_error(e, BOT_TOKEN_VAR, "load_configuration"))?;

    info!("{}", config.summary());
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    observability::init_tracing()?;

    let config = load_configuration()?;

    let store = BookmarkStore::connect(&config.database).await?;
    store.initialize().await?;
    let store = Arc::new(store);

    let localization_manager = localization::create_localization_manager()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let bot = Bot::with_client(config.bot.token.clone(), client);

    // Fails fast when Telegram rejects the token
    let me = bot
        .get_me()
        .await
        .context("Telegram rejected the bot token")?;
    let bot_username = me.user.username.clone();

    info!(
        bot_username = ?bot_username,
        http_timeout_secs = config.bot.http_timeout_secs,
        "Bot initialized, starting dispatcher"
    );

    let handler = bot::schema(store, localization_manager, bot_username);

    // Every update gets its own task; the store pool is the only shared state.
    Dispatcher::builder(bot, handler)
        .distribution_function(|_| None::<std::convert::Infallible>)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
